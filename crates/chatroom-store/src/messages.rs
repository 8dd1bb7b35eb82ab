use rusqlite::params;
use uuid::Uuid;

use chatroom_shared::{ChannelId, HexColor, MessageId, UserId};

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::models::{bad_column, decode_ts, encode_ts, Message};

const MESSAGE_COLUMNS: &str = "id, channel_id, sender, sender_id, text, image_url, gif_url,
     timestamp, message_bg, message_text";

impl Database {
    pub fn insert_message(&self, message: &Message) -> Result<()> {
        self.conn().execute(
            "INSERT INTO messages (id, channel_id, sender, sender_id, text, image_url, gif_url,
                                   timestamp, message_bg, message_text)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                message.id.to_string(),
                message.channel_id.to_string(),
                message.sender,
                message.sender_id.as_str(),
                message.text,
                message.image_url,
                message.gif_url,
                encode_ts(&message.timestamp),
                message.message_bg.as_ref().map(HexColor::as_str),
                message.message_text.as_ref().map(HexColor::as_str),
            ],
        )?;
        Ok(())
    }

    /// All messages of a channel, oldest first.
    pub fn get_messages_for_channel(&self, channel_id: ChannelId) -> Result<Vec<Message>> {
        let sql = format!(
            "SELECT {MESSAGE_COLUMNS}
             FROM messages
             WHERE channel_id = ?1
             ORDER BY timestamp ASC, rowid ASC"
        );
        let mut stmt = self.conn().prepare(&sql)?;

        let rows = stmt.query_map(params![channel_id.to_string()], row_to_message)?;

        let mut messages = Vec::new();
        for row in rows {
            messages.push(row?);
        }
        Ok(messages)
    }

    pub fn get_message_by_id(&self, id: MessageId) -> Result<Message> {
        let sql = format!("SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = ?1");
        self.conn()
            .query_row(&sql, params![id.to_string()], row_to_message)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
                other => StoreError::Sqlite(other),
            })
    }

    // only the text column; everything else is immutable
    pub fn update_message_text(&self, id: MessageId, text: &str) -> Result<bool> {
        let affected = self.conn().execute(
            "UPDATE messages SET text = ?1 WHERE id = ?2",
            params![text, id.to_string()],
        )?;
        Ok(affected > 0)
    }

    pub fn delete_message(&self, id: MessageId) -> Result<bool> {
        let affected = self.conn().execute(
            "DELETE FROM messages WHERE id = ?1",
            params![id.to_string()],
        )?;
        Ok(affected > 0)
    }
}

fn row_to_message(row: &rusqlite::Row<'_>) -> rusqlite::Result<Message> {
    let id_str: String = row.get(0)?;
    let channel_id_str: String = row.get(1)?;
    let sender: String = row.get(2)?;
    let sender_id: String = row.get(3)?;
    let text: Option<String> = row.get(4)?;
    let image_url: Option<String> = row.get(5)?;
    let gif_url: Option<String> = row.get(6)?;
    let ts_str: String = row.get(7)?;
    let bg_str: Option<String> = row.get(8)?;
    let fg_str: Option<String> = row.get(9)?;

    let id = Uuid::parse_str(&id_str).map_err(|e| bad_column(0, e))?;
    let channel_id = Uuid::parse_str(&channel_id_str).map_err(|e| bad_column(1, e))?;
    let timestamp = decode_ts(&ts_str).map_err(|e| bad_column(7, e))?;

    // A colour that no longer parses is treated as absent rather than failing
    // the whole snapshot.
    let message_bg = bg_str.and_then(|s| HexColor::parse(&s).ok());
    let message_text = fg_str.and_then(|s| HexColor::parse(&s).ok());

    Ok(Message {
        id: MessageId(id),
        channel_id: ChannelId(channel_id),
        sender,
        sender_id: UserId(sender_id),
        text,
        image_url,
        gif_url,
        timestamp,
        message_bg,
        message_text,
    })
}
