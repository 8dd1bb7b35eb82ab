use rusqlite::Connection;

// Per-user colours, plus the colour snapshot carried by each message.
const UP_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS user_settings (
    user_id      TEXT PRIMARY KEY NOT NULL,   -- identity provider uid
    avatar_url   TEXT NOT NULL DEFAULT '',
    message_bg   TEXT NOT NULL DEFAULT '#007a5a',
    message_text TEXT NOT NULL DEFAULT '#fff'
);

ALTER TABLE messages ADD COLUMN message_bg TEXT;
ALTER TABLE messages ADD COLUMN message_text TEXT;
"#;

pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
