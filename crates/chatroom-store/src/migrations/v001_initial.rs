//! Channels, messages and the blob catalogue.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Channels
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS channels (
    id          TEXT PRIMARY KEY NOT NULL,    -- UUID v4
    name        TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    created_at  TEXT NOT NULL                 -- RFC-3339, microsecond precision
);

CREATE INDEX IF NOT EXISTS idx_channels_created_at ON channels(created_at);

-- ----------------------------------------------------------------
-- Messages
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS messages (
    id         TEXT PRIMARY KEY NOT NULL,     -- UUID v4
    channel_id TEXT NOT NULL,                 -- FK -> channels(id)
    sender     TEXT NOT NULL,                 -- display name at send time
    sender_id  TEXT NOT NULL,                 -- identity provider uid
    text       TEXT,
    image_url  TEXT,
    timestamp  TEXT NOT NULL,                 -- RFC-3339, microsecond precision

    FOREIGN KEY (channel_id) REFERENCES channels(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_messages_channel_ts
    ON messages(channel_id, timestamp ASC);

-- ----------------------------------------------------------------
-- Blobs (upload metadata)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS blobs (
    id          TEXT PRIMARY KEY NOT NULL,    -- UUID v4
    path        TEXT NOT NULL UNIQUE,         -- relative to the blob root
    url         TEXT NOT NULL,
    file_size   INTEGER NOT NULL,
    blake3_hash TEXT NOT NULL,
    created_at  TEXT NOT NULL
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
