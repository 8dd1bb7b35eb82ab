//! SQLite connection for the chatroom document collections.
//!
//! Opening a [`Database`] always brings the schema up to date first, so
//! every other module can assume the current tables exist.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use rusqlite::Connection;

use crate::error::{Result, StoreError};
use crate::migrations;
use crate::models::{bad_column, decode_ts};

pub const DATABASE_FILE: &str = "chatroom.db";

/// Owned SQLite connection. Not `Sync`; share it through
/// [`DocumentStore`](crate::DocumentStore).
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open `chatroom.db` in the platform data directory, e.g.
    /// `~/.local/share/chatroom/` on Linux.
    pub fn new() -> Result<Self> {
        let data_dir = default_data_dir()?;
        std::fs::create_dir_all(&data_dir)?;

        let db_path = data_dir.join(DATABASE_FILE);
        tracing::info!(path = %db_path.display(), "opening chat database");

        Self::open_at(&db_path)
    }

    /// Open or create the database file at `path` and migrate it.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL lets live queries read while a write is in flight
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run_migrations(&conn)?;

        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Newest write time across channels and messages, `None` when both are
    /// empty. Stored timestamps are fixed-width RFC 3339, so `MAX` on the
    /// text orders them correctly.
    pub fn latest_timestamp(&self) -> Result<Option<DateTime<Utc>>> {
        let latest = self.conn().query_row(
            "SELECT MAX(ts) FROM (
                 SELECT timestamp AS ts FROM messages
                 UNION ALL
                 SELECT created_at FROM channels
             )",
            [],
            |row| {
                let ts: Option<String> = row.get(0)?;
                ts.map(|s| decode_ts(&s).map_err(|e| bad_column(0, e)))
                    .transpose()
            },
        )?;
        Ok(latest)
    }

    /// File backing this connection; `None` for in-memory databases.
    pub fn path(&self) -> Option<PathBuf> {
        self.conn.path().map(PathBuf::from)
    }
}

/// Platform data directory shared by the database, blobs and local storage.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "chatroom", "chatroom").ok_or(StoreError::NoDataDir)?;
    Ok(dirs.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::SubsecRound;

    #[test]
    fn test_open_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join(DATABASE_FILE);

        let db = Database::open_at(&db_path).unwrap();
        assert!(db_path.exists());
        assert!(db.path().is_some());
    }

    #[test]
    fn test_reopen_keeps_schema_version() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join(DATABASE_FILE);

        drop(Database::open_at(&db_path).unwrap());
        let db = Database::open_at(&db_path).unwrap();
        let version: u32 = db
            .conn()
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap();
        assert_eq!(version, migrations::CURRENT_VERSION);
    }

    #[test]
    fn test_latest_timestamp_spans_collections() {
        use crate::models::{Channel, Message};
        use chatroom_shared::{ChannelId, MessageId, UserId};

        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join(DATABASE_FILE)).unwrap();
        assert!(db.latest_timestamp().unwrap().is_none());

        let created_at = Utc::now().trunc_subsecs(6);
        let channel = Channel {
            id: ChannelId::new(),
            name: "general".into(),
            description: String::new(),
            created_at,
        };
        db.insert_channel(&channel).unwrap();
        assert_eq!(db.latest_timestamp().unwrap(), Some(created_at));

        let later = created_at + chrono::Duration::hours(1);
        db.insert_message(&Message {
            id: MessageId::new(),
            channel_id: channel.id,
            sender: "Ada".into(),
            sender_id: UserId::new("ada"),
            text: Some("from the future".into()),
            image_url: None,
            gif_url: None,
            timestamp: later,
            message_bg: None,
            message_text: None,
        })
        .unwrap();
        assert_eq!(db.latest_timestamp().unwrap(), Some(later));
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join(DATABASE_FILE)).unwrap();
        let enabled: i64 = db
            .conn()
            .pragma_query_value(None, "foreign_keys", |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }
}
