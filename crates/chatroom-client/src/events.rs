use serde::Serialize;

use chatroom_shared::ChannelId;

use crate::session::AuthState;

/// What changed after [`ChatClient::next_event`](crate::client::ChatClient::next_event)
/// applied an update to the view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    AuthChanged(AuthState),
    ChannelsUpdated { selection_changed: bool },
    MessagesUpdated(ChannelId),
}

/// Serializable summary for front ends that log or forward events.
#[derive(Debug, Clone, Serialize)]
pub struct EventSummary {
    pub kind: &'static str,
    pub channel_id: Option<String>,
}

impl From<&ClientEvent> for EventSummary {
    fn from(event: &ClientEvent) -> Self {
        match event {
            ClientEvent::AuthChanged(_) => Self {
                kind: "auth-changed",
                channel_id: None,
            },
            ClientEvent::ChannelsUpdated { .. } => Self {
                kind: "channels-updated",
                channel_id: None,
            },
            ClientEvent::MessagesUpdated(id) => Self {
                kind: "messages-updated",
                channel_id: Some(id.to_string()),
            },
        }
    }
}
