//! The chat client view-model.
//!
//! [`ChatClient`] owns the store handles, the live queries and the
//! [`AppState`]. User actions are methods (see the `commands` modules);
//! backend pushes are consumed by [`ChatClient::next_event`], which applies
//! each snapshot to the view state before reporting what changed.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use chatroom_shared::{ChannelId, Identity, MessageId};
use chatroom_store::{
    default_data_dir, BlobStore, Channel, DocumentStore, LiveQuery, Message, UserSettings,
    DATABASE_FILE,
};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::events::ClientEvent;
use crate::gif::GiphyClient;
use crate::local_storage::{LocalStorage, STORAGE_FILE};
use crate::session::{AuthState, IdentityProvider, LocalIdentityProvider, SessionHolder};
use crate::state::AppState;
use crate::stream::MessageRow;

pub const BLOB_DIR: &str = "blobs";

pub struct ChatClient<P: IdentityProvider = LocalIdentityProvider> {
    pub(crate) store: DocumentStore,
    pub(crate) blobs: BlobStore,
    pub(crate) provider: P,
    pub(crate) giphy: GiphyClient,
    pub(crate) storage: LocalStorage,
    pub(crate) state: AppState,
    session: SessionHolder,
    channel_query: Option<LiveQuery<Channel>>,
    message_query: Option<LiveQuery<Message>>,
}

impl<P: IdentityProvider> ChatClient<P> {
    /// Open the stores under the configured data directory and start
    /// watching the channel list. Must be called inside a tokio runtime.
    pub async fn open(config: &ClientConfig, provider: P) -> Result<Self> {
        let data_dir: PathBuf = match &config.data_dir {
            Some(dir) => dir.clone(),
            None => default_data_dir()?,
        };
        std::fs::create_dir_all(&data_dir)?;

        info!(path = %data_dir.display(), "Opening chat client");

        let store = DocumentStore::open_at(&data_dir.join(DATABASE_FILE))?;
        let blobs = BlobStore::new(data_dir.join(BLOB_DIR), config.max_upload_size).await?;
        let storage = LocalStorage::open(&data_dir.join(STORAGE_FILE))?;
        let giphy = GiphyClient::new(config)?;

        Ok(Self::from_parts(store, blobs, storage, giphy, provider))
    }

    pub fn from_parts(
        store: DocumentStore,
        blobs: BlobStore,
        storage: LocalStorage,
        giphy: GiphyClient,
        provider: P,
    ) -> Self {
        let session = SessionHolder::new(provider.subscribe());
        let channel_query = Some(store.watch_channels());
        Self {
            store,
            blobs,
            provider,
            giphy,
            storage,
            state: AppState::default(),
            session,
            channel_query,
            message_query: None,
        }
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Mutable view state for local-only edits (composer, picker, layout).
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn local_storage_mut(&mut self) -> &mut LocalStorage {
        &mut self.storage
    }

    pub fn auth_state(&self) -> &AuthState {
        self.session.state()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.session.identity()
    }

    pub fn selected_channel(&self) -> Option<&Channel> {
        self.state.directory.selected_channel()
    }

    pub fn rows(&self) -> Vec<MessageRow<'_>> {
        self.state.stream.rows(self.identity().map(|i| &i.uid))
    }

    /// Message id for a 1-based position in the current list.
    pub fn message_at(&self, position: usize) -> Option<MessageId> {
        let index = position.checked_sub(1)?;
        self.state.stream.messages().get(index).map(|m| m.id)
    }

    // ------------------------------------------------------------------
    // Event loop
    // ------------------------------------------------------------------

    /// Wait for the next backend push, apply it, and report it. `None` once
    /// every subscription has ended.
    pub async fn next_event(&mut self) -> Option<ClientEvent> {
        loop {
            tokio::select! {
                Some(auth) = self.session.changed() => return Some(self.on_auth_changed(auth)),
                Some(channels) = recv_snapshot(&mut self.channel_query) => {
                    return Some(self.on_channels(channels));
                }
                Some(messages) = recv_snapshot(&mut self.message_query) => {
                    if let Some(event) = self.on_messages(messages) {
                        return Some(event);
                    }
                }
                else => return None,
            }
        }
    }

    /// Apply an auth change that is already pending, without waiting.
    pub(crate) fn sync_session(&mut self) -> Option<ClientEvent> {
        let auth = self.session.poll_change()?;
        Some(self.on_auth_changed(auth))
    }

    fn on_auth_changed(&mut self, auth: AuthState) -> ClientEvent {
        match &auth {
            AuthState::SignedIn(identity) => {
                self.state.settings = self.load_settings(identity);
                let channels = self.state.directory.channels().to_vec();
                if self
                    .state
                    .directory
                    .apply_snapshot(channels, true, &self.storage)
                {
                    self.resubscribe_messages();
                }
            }
            AuthState::SignedOut => {
                self.state.reset_user_state();
                self.resubscribe_messages();
            }
            AuthState::Loading => {}
        }
        ClientEvent::AuthChanged(auth)
    }

    fn load_settings(&self, identity: &Identity) -> UserSettings {
        match self.store.get_settings(&identity.uid) {
            Ok(settings) => settings.unwrap_or_default(),
            Err(e) => {
                warn!(user = %identity.uid, error = %e, "Could not load settings, using defaults");
                UserSettings::default()
            }
        }
    }

    fn on_channels(&mut self, channels: Vec<Channel>) -> ClientEvent {
        let signed_in = self.identity().is_some();
        let selection_changed =
            self.state
                .directory
                .apply_snapshot(channels, signed_in, &self.storage);
        if selection_changed {
            self.resubscribe_messages();
        }
        ClientEvent::ChannelsUpdated { selection_changed }
    }

    fn on_messages(&mut self, messages: Vec<Message>) -> Option<ClientEvent> {
        let channel_id = self.state.directory.selected()?;
        self.state.stream.apply_snapshot(messages);

        let edit_gone = self
            .state
            .edit
            .as_ref()
            .is_some_and(|e| self.state.stream.get(e.message_id).is_none());
        if edit_gone {
            self.state.edit = None;
        }
        Some(ClientEvent::MessagesUpdated(channel_id))
    }

    /// Tear down the message query and follow the current selection.
    pub(crate) fn resubscribe_messages(&mut self) {
        if let Some(mut query) = self.message_query.take() {
            query.unsubscribe();
        }
        self.state.stream.clear();
        self.state.edit = None;

        if let Some(channel_id) = self.state.directory.selected() {
            debug!(channel_id = %channel_id, "Watching messages");
            self.message_query = Some(self.store.watch_messages(channel_id));
        }
    }

    pub(crate) fn require_identity(&self) -> Result<Identity> {
        self.identity()
            .cloned()
            .ok_or(crate::error::ClientError::NotSignedIn)
    }

    pub(crate) fn require_channel(&self) -> Result<ChannelId> {
        self.state
            .directory
            .selected()
            .ok_or(crate::error::ClientError::NoChannelSelected)
    }
}

async fn recv_snapshot<T: Send + 'static>(query: &mut Option<LiveQuery<T>>) -> Option<Vec<T>> {
    match query {
        Some(query) => query.next().await,
        None => None,
    }
}
