//! Shared, thread-safe handle to the document database.
//!
//! [`DocumentStore`] serialises all access to the [`Database`] behind a
//! mutex, assigns ids and timestamps to new records, and publishes a
//! [`Change`] on its broadcast feed after every successful write. Live
//! queries subscribe to that feed.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, SubsecRound, Utc};
use tokio::sync::broadcast;
use tracing::{debug, info};

use chatroom_shared::{ChannelId, MessageId, UserId};

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::live::{Change, LiveQuery};
use crate::models::{Blob, Channel, Message, NewMessage, SettingsPatch, UserSettings};

/// Capacity of the change feed. Slow subscribers see `Lagged` and re-query.
const CHANGE_FEED_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct DocumentStore {
    db: Arc<Mutex<Database>>,
    changes: broadcast::Sender<Change>,
    last_write: Arc<Mutex<DateTime<Utc>>>,
}

impl DocumentStore {
    /// Wrap an open database. The write clock resumes after the newest
    /// stored timestamp, so ordering survives a reopen even if the wall
    /// clock has gone backwards since.
    pub fn new(db: Database) -> Result<Self> {
        let last_write = db.latest_timestamp()?.unwrap_or(DateTime::<Utc>::MIN_UTC);
        let (changes, _) = broadcast::channel(CHANGE_FEED_CAPACITY);
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            changes,
            last_write: Arc::new(Mutex::new(last_write)),
        })
    }

    /// Open the store in the platform data directory.
    pub fn open_default() -> Result<Self> {
        Self::new(Database::new()?)
    }

    /// Open the store at an explicit database path.
    pub fn open_at(path: &Path) -> Result<Self> {
        Self::new(Database::open_at(path)?)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Database>> {
        self.db.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// Next write timestamp: microsecond precision, strictly increasing.
    fn next_timestamp(&self) -> Result<DateTime<Utc>> {
        let mut last = self.last_write.lock().map_err(|_| StoreError::LockPoisoned)?;
        let now = Utc::now().trunc_subsecs(6);
        let ts = if now > *last {
            now
        } else {
            *last + Duration::microseconds(1)
        };
        *last = ts;
        Ok(ts)
    }

    fn publish(&self, change: Change) {
        // no receivers is fine
        let _ = self.changes.send(change);
    }

    // ------------------------------------------------------------------
    // Channels
    // ------------------------------------------------------------------

    pub fn add_channel(&self, name: &str, description: &str) -> Result<Channel> {
        let channel = Channel {
            id: ChannelId::new(),
            name: name.to_string(),
            description: description.to_string(),
            created_at: self.next_timestamp()?,
        };
        self.lock()?.insert_channel(&channel)?;

        info!(channel_id = %channel.id, name = %channel.name, "Channel created");
        self.publish(Change::Channels);
        Ok(channel)
    }

    pub fn list_channels(&self) -> Result<Vec<Channel>> {
        self.lock()?.list_channels()
    }

    // ------------------------------------------------------------------
    // Messages
    // ------------------------------------------------------------------

    pub fn add_message(&self, new: NewMessage) -> Result<Message> {
        let (text, image_url, gif_url) = new.payload.into_parts();
        let message = Message {
            id: MessageId::new(),
            channel_id: new.channel_id,
            sender: new.sender,
            sender_id: new.sender_id,
            text,
            image_url,
            gif_url,
            timestamp: self.next_timestamp()?,
            message_bg: new.message_bg,
            message_text: new.message_text,
        };
        self.lock()?.insert_message(&message)?;

        debug!(msg_id = %message.id, channel = %message.channel_id, "Message stored");
        self.publish(Change::Messages(message.channel_id));
        Ok(message)
    }

    pub fn messages_for(&self, channel_id: ChannelId) -> Result<Vec<Message>> {
        self.lock()?.get_messages_for_channel(channel_id)
    }

    pub fn get_message(&self, id: MessageId) -> Result<Message> {
        self.lock()?.get_message_by_id(id)
    }

    /// Merge a new `text` into an existing message.
    pub fn update_message_text(&self, id: MessageId, text: &str) -> Result<Message> {
        let updated = {
            let db = self.lock()?;
            if !db.update_message_text(id, text)? {
                return Err(StoreError::NotFound);
            }
            db.get_message_by_id(id)?
        };

        debug!(msg_id = %id, "Message text updated");
        self.publish(Change::Messages(updated.channel_id));
        Ok(updated)
    }

    /// Hard delete; there is no tombstone.
    pub fn delete_message(&self, id: MessageId) -> Result<()> {
        let channel_id = {
            let db = self.lock()?;
            let existing = db.get_message_by_id(id)?;
            db.delete_message(id)?;
            existing.channel_id
        };

        debug!(msg_id = %id, "Message deleted");
        self.publish(Change::Messages(channel_id));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    pub fn get_settings(&self, user_id: &UserId) -> Result<Option<UserSettings>> {
        self.lock()?.get_user_settings(user_id)
    }

    pub fn merge_settings(&self, user_id: &UserId, patch: &SettingsPatch) -> Result<UserSettings> {
        let saved = self.lock()?.merge_user_settings(user_id, patch)?;

        info!(user = %user_id, "Settings saved");
        Ok(saved)
    }

    // ------------------------------------------------------------------
    // Blob catalogue
    // ------------------------------------------------------------------

    pub fn record_blob(&self, blob: &Blob) -> Result<()> {
        self.lock()?.insert_blob(blob)
    }

    pub fn blob_by_path(&self, path: &str) -> Result<Blob> {
        self.lock()?.get_blob_by_path(path)
    }

    // ------------------------------------------------------------------
    // Live queries
    // ------------------------------------------------------------------

    /// All channels, oldest first. Must be called inside a tokio runtime.
    pub fn watch_channels(&self) -> LiveQuery<Channel> {
        let changes = self.changes.subscribe();
        let store = self.clone();
        LiveQuery::spawn(
            "channels",
            changes,
            |change| matches!(change, Change::Channels),
            move || store.list_channels(),
        )
    }

    /// Messages of one channel, oldest first. Must be called inside a tokio
    /// runtime.
    pub fn watch_messages(&self, channel_id: ChannelId) -> LiveQuery<Message> {
        let changes = self.changes.subscribe();
        let store = self.clone();
        LiveQuery::spawn(
            "messages",
            changes,
            move |change| matches!(change, Change::Messages(id) if *id == channel_id),
            move || store.messages_for(channel_id),
        )
    }
}
