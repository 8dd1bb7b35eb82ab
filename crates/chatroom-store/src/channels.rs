//! Channel documents: insert, lookup and the ordered listing behind the
//! channel live query.

use rusqlite::params;
use uuid::Uuid;

use chatroom_shared::ChannelId;

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::models::{bad_column, decode_ts, encode_ts, Channel};

impl Database {
    pub fn insert_channel(&self, channel: &Channel) -> Result<()> {
        self.conn().execute(
            "INSERT INTO channels (id, name, description, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                channel.id.to_string(),
                channel.name,
                channel.description,
                encode_ts(&channel.created_at),
            ],
        )?;
        Ok(())
    }

    /// `NotFound` when no channel has this id.
    pub fn get_channel(&self, id: ChannelId) -> Result<Channel> {
        self.conn()
            .query_row(
                "SELECT id, name, description, created_at
                 FROM channels
                 WHERE id = ?1",
                params![id.to_string()],
                channel_from_row,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
                other => StoreError::Sqlite(other),
            })
    }

    /// Every channel in creation order; ties fall back to insertion order.
    pub fn list_channels(&self) -> Result<Vec<Channel>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, name, description, created_at
             FROM channels
             ORDER BY created_at ASC, rowid ASC",
        )?;

        let channels = stmt
            .query_map([], channel_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(channels)
    }
}

fn channel_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Channel> {
    let id: String = row.get(0)?;
    let created_at: String = row.get(3)?;
    Ok(Channel {
        id: ChannelId(Uuid::parse_str(&id).map_err(|e| bad_column(0, e))?),
        name: row.get(1)?,
        description: row.get(2)?,
        created_at: decode_ts(&created_at).map_err(|e| bad_column(3, e))?,
    })
}
