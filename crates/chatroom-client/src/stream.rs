//! Message list view state for the selected channel.
//!
//! The list is replaced wholesale by every live-query snapshot. Rendering
//! goes through [`MessageStream::rows`], which computes grouping, initials,
//! bubble colours and per-row permissions for the signed-in user.

use serde::Serialize;

use chatroom_shared::{validate_edit, HexColor, MessageId, UserId, ValidationError};
use chatroom_store::Message;

/// Up to two upper-cased initials from a display name, `?` when blank.
pub fn initials(name: &str) -> String {
    let letters: String = name
        .split(' ')
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect();
    if letters.is_empty() {
        "?".to_string()
    } else {
        letters
    }
}

/// One rendered message.
#[derive(Debug, Clone, Serialize)]
pub struct MessageRow<'a> {
    pub message: &'a Message,
    pub is_own: bool,
    /// First message in a run from the same sender.
    pub show_header: bool,
    pub initials: String,
    pub background: HexColor,
    pub foreground: HexColor,
    pub can_edit: bool,
    pub can_delete: bool,
}

#[derive(Debug, Default)]
pub struct MessageStream {
    messages: Vec<Message>,
}

impl MessageStream {
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn apply_snapshot(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn rows(&self, current_user: Option<&UserId>) -> Vec<MessageRow<'_>> {
        self.messages
            .iter()
            .enumerate()
            .map(|(i, message)| {
                let is_own = current_user == Some(&message.sender_id);
                let show_header = i == 0 || self.messages[i - 1].sender_id != message.sender_id;
                MessageRow {
                    message,
                    is_own,
                    show_header,
                    initials: initials(&message.sender),
                    background: message
                        .message_bg
                        .clone()
                        .unwrap_or_else(HexColor::default_background),
                    foreground: message
                        .message_text
                        .clone()
                        .unwrap_or_else(HexColor::default_text),
                    can_edit: is_own && message.has_text(),
                    can_delete: is_own,
                }
            })
            .collect()
    }

    /// Ownership check shared by edit and delete.
    pub fn owned(&self, id: MessageId, user: &UserId) -> Option<&Message> {
        self.get(id).filter(|m| &m.sender_id == user)
    }
}

/// An edit in progress on one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub message_id: MessageId,
    pub original: Option<String>,
    pub draft: String,
}

impl EditDraft {
    /// Start editing `message`; only text messages owned by `user` qualify.
    pub fn begin(message: &Message, user: &UserId) -> Result<Self, ValidationError> {
        if &message.sender_id != user || !message.has_text() {
            return Err(ValidationError::NotOwner);
        }
        Ok(Self {
            message_id: message.id,
            original: message.text.clone(),
            draft: message.text.clone().unwrap_or_default(),
        })
    }

    pub fn can_save(&self) -> bool {
        self.validated().is_ok()
    }

    pub fn validated(&self) -> Result<String, ValidationError> {
        validate_edit(self.original.as_deref(), &self.draft)
    }
}
