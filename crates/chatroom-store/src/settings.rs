//! Per-user settings records.

use rusqlite::{params, OptionalExtension};

use chatroom_shared::constants::{DEFAULT_MESSAGE_BG, DEFAULT_MESSAGE_TEXT};
use chatroom_shared::{HexColor, UserId};

use crate::database::Database;
use crate::error::Result;
use crate::models::{SettingsPatch, UserSettings};

impl Database {
    /// Read a user's settings. `None` until the first save.
    pub fn get_user_settings(&self, user_id: &UserId) -> Result<Option<UserSettings>> {
        let row = self
            .conn()
            .query_row(
                "SELECT avatar_url, message_bg, message_text
                 FROM user_settings WHERE user_id = ?1",
                params![user_id.as_str()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        let Some((avatar_url, bg, fg)) = row else {
            return Ok(None);
        };

        Ok(Some(UserSettings {
            avatar_url,
            message_bg: HexColor::parse(&bg)?,
            message_text: HexColor::parse(&fg)?,
        }))
    }

    /// Create or update the record, touching only the fields set in `patch`.
    pub fn merge_user_settings(
        &self,
        user_id: &UserId,
        patch: &SettingsPatch,
    ) -> Result<UserSettings> {
        self.conn().execute(
            "INSERT INTO user_settings (user_id, avatar_url, message_bg, message_text)
             VALUES (?1, COALESCE(?2, ''), COALESCE(?3, ?5), COALESCE(?4, ?6))
             ON CONFLICT(user_id) DO UPDATE SET
                avatar_url   = COALESCE(?2, avatar_url),
                message_bg   = COALESCE(?3, message_bg),
                message_text = COALESCE(?4, message_text)",
            params![
                user_id.as_str(),
                patch.avatar_url,
                patch.message_bg.as_ref().map(HexColor::as_str),
                patch.message_text.as_ref().map(HexColor::as_str),
                DEFAULT_MESSAGE_BG,
                DEFAULT_MESSAGE_TEXT,
            ],
        )?;

        Ok(self.get_user_settings(user_id)?.unwrap_or_default())
    }
}
