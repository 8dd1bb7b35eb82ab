use tracing::info;

use chatroom_shared::ChannelId;
use chatroom_store::Channel;

use super::logged;
use crate::channels::validate_channel_name;
use crate::client::ChatClient;
use crate::error::{ClientError, Result};
use crate::session::IdentityProvider;

impl<P: IdentityProvider> ChatClient<P> {
    /// Add a channel. The new channel reaches the list through the live
    /// query, not through this return value.
    pub async fn create_channel(&mut self, name: &str, description: &str) -> Result<Channel> {
        let result = self.try_create_channel(name, description);
        logged("create-channel", result)
    }

    fn try_create_channel(&self, name: &str, description: &str) -> Result<Channel> {
        self.require_identity()?;
        let name = validate_channel_name(name)?;
        Ok(self.store.add_channel(&name, description.trim())?)
    }

    /// Select a listed channel, remember it, and follow its messages.
    /// Returns `false` when nothing changed.
    pub fn select_channel(&mut self, id: ChannelId) -> Result<bool> {
        let result = self.state.directory.select(id, &mut self.storage);
        let changed = logged("select-channel", result)?;
        if changed {
            info!(channel_id = %id, "Channel selected");
            self.state.layout.on_channel_selected();
            self.resubscribe_messages();
        }
        Ok(changed)
    }

    /// Select by channel name or id string.
    pub fn select_channel_by_key(&mut self, key: &str) -> Result<bool> {
        let id = self
            .state
            .directory
            .lookup(key)
            .map(|c| c.id)
            .ok_or(ClientError::Store(chatroom_store::StoreError::NotFound));
        let id = logged("select-channel", id)?;
        self.select_channel(id)
    }
}
