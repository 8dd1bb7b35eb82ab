use tracing::info;

use chatroom_shared::{validate_edit, MessageId, MessagePayload, ValidationError};
use chatroom_store::{Message, NewMessage};

use super::logged;
use crate::client::ChatClient;
use crate::error::Result;
use crate::session::IdentityProvider;
use crate::stream::EditDraft;

impl<P: IdentityProvider> ChatClient<P> {
    /// Send the composer contents as one message.
    ///
    /// Returns `Ok(None)` without touching anything when the composer holds
    /// no text, image or GIF. A pending image is uploaded first; the record
    /// is written only after the upload succeeds. On success the composer
    /// and the GIF picker are cleared; on failure both are left as they are.
    pub async fn send(&mut self) -> Result<Option<Message>> {
        if !self.state.composer.has_payload() {
            return Ok(None);
        }
        let result = self.try_send().await;
        let message = logged("send-message", result)?;

        self.state.composer.clear();
        self.state.gif_picker.close();
        Ok(Some(message))
    }

    async fn try_send(&self) -> Result<Message> {
        let identity = self.require_identity()?;
        let channel_id = self.require_channel()?;

        let composer = self.state.composer.clone();
        let image_url = match &composer.pending_image {
            Some(image) => Some(self.upload_image(image).await?),
            None => None,
        };
        let payload =
            MessagePayload::new(Some(composer.text.as_str()), image_url, composer.pending_gif)?;

        let message = self.store.add_message(NewMessage {
            channel_id,
            sender: identity.sender_name(),
            sender_id: identity.uid,
            payload,
            message_bg: Some(self.state.settings.message_bg.clone()),
            message_text: Some(self.state.settings.message_text.clone()),
        })?;

        info!(msg_id = %message.id, channel = %channel_id, "Message sent");
        Ok(message)
    }

    /// Replace the text of one of the user's own messages.
    pub async fn edit_message(&mut self, id: MessageId, text: &str) -> Result<Message> {
        let result = self.try_edit(id, text);
        let message = logged("edit-message", result)?;
        if self.state.edit.as_ref().is_some_and(|e| e.message_id == id) {
            self.state.edit = None;
        }
        Ok(message)
    }

    fn try_edit(&self, id: MessageId, text: &str) -> Result<Message> {
        let identity = self.require_identity()?;
        let current = self
            .state
            .stream
            .owned(id, &identity.uid)
            .filter(|m| m.has_text())
            .ok_or(ValidationError::NotOwner)?;
        let text = validate_edit(current.text.as_deref(), text)?;
        Ok(self.store.update_message_text(id, &text)?)
    }

    /// Hard-delete one of the user's own messages. Confirmation is the
    /// front end's job.
    pub async fn delete_message(&mut self, id: MessageId) -> Result<()> {
        let result = self.try_delete(id);
        logged("delete-message", result)
    }

    fn try_delete(&self, id: MessageId) -> Result<()> {
        let identity = self.require_identity()?;
        self.state
            .stream
            .owned(id, &identity.uid)
            .ok_or(ValidationError::NotOwner)?;
        self.store.delete_message(id)?;
        info!(msg_id = %id, "Message deleted");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Inline edit box
    // ------------------------------------------------------------------

    pub fn begin_edit(&mut self, id: MessageId) -> Result<()> {
        let identity = self.require_identity()?;
        let message = self
            .state
            .stream
            .get(id)
            .ok_or(ValidationError::NotOwner)?;
        self.state.edit = Some(EditDraft::begin(message, &identity.uid)?);
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.state.edit = None;
    }

    /// Save the open edit box.
    pub async fn save_edit(&mut self) -> Result<Option<Message>> {
        let Some(edit) = self.state.edit.clone() else {
            return Ok(None);
        };
        self.edit_message(edit.message_id, &edit.draft).await.map(Some)
    }
}
