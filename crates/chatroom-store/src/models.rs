//! Domain model structs persisted in the document database.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be handed
//! directly to a UI layer.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use chatroom_shared::{ChannelId, HexColor, MessageId, MessagePayload, UserId};

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// A named chat room.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Channel {
    /// Unique channel identifier.
    pub id: ChannelId,
    /// Human-readable channel name.
    pub name: String,
    /// Free-form description, possibly empty.
    pub description: String,
    /// Store-assigned creation time.
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A single chat message as stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Store-assigned identifier.
    pub id: MessageId,
    /// The channel this message belongs to.
    pub channel_id: ChannelId,
    /// Sender display name at send time.
    pub sender: String,
    /// Sender uid.
    pub sender_id: UserId,
    pub text: Option<String>,
    pub image_url: Option<String>,
    pub gif_url: Option<String>,
    /// Store-assigned, strictly increasing per write.
    pub timestamp: DateTime<Utc>,
    /// Bubble colours copied from the sender's settings when sent.
    pub message_bg: Option<HexColor>,
    pub message_text: Option<HexColor>,
}

impl Message {
    /// Whether the message has text that can be edited.
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

/// Everything the client supplies for a new message. The store fills in the
/// id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub channel_id: ChannelId,
    pub sender: String,
    pub sender_id: UserId,
    pub payload: MessagePayload,
    pub message_bg: Option<HexColor>,
    pub message_text: Option<HexColor>,
}

// ---------------------------------------------------------------------------
// User settings
// ---------------------------------------------------------------------------

/// Per-user display preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSettings {
    pub avatar_url: String,
    pub message_bg: HexColor,
    pub message_text: HexColor,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            avatar_url: String::new(),
            message_bg: HexColor::default_background(),
            message_text: HexColor::default_text(),
        }
    }
}

/// Field-level update: `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub avatar_url: Option<String>,
    pub message_bg: Option<HexColor>,
    pub message_text: Option<HexColor>,
}

impl From<&UserSettings> for SettingsPatch {
    fn from(s: &UserSettings) -> Self {
        Self {
            avatar_url: Some(s.avatar_url.clone()),
            message_bg: Some(s.message_bg.clone()),
            message_text: Some(s.message_text.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Blob (file metadata)
// ---------------------------------------------------------------------------

/// Metadata for an uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Blob {
    /// Unique blob identifier.
    pub id: Uuid,
    /// Storage path relative to the blob root, e.g. `images/1700000000000_cat.png`.
    pub path: String,
    /// Durable download URL.
    pub url: String,
    /// File size in bytes.
    pub file_size: i64,
    /// BLAKE3 content hash (hex string).
    pub blake3_hash: String,
    /// When this blob was written.
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Timestamp encoding
// ---------------------------------------------------------------------------

/// Fixed-precision RFC 3339 so that text ordering equals time ordering.
pub(crate) fn encode_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn decode_ts(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

/// Wrap a column decoding failure the way rusqlite expects.
pub(crate) fn bad_column<E>(idx: usize, e: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_ts_encoding_orders_lexically() {
        let a = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let b = a + chrono::Duration::microseconds(1);
        assert!(encode_ts(&a) < encode_ts(&b));
        assert_eq!(decode_ts(&encode_ts(&b)).unwrap(), b);
    }

    #[test]
    fn test_default_settings() {
        let s = UserSettings::default();
        assert_eq!(s.message_bg.as_str(), "#007a5a");
        assert_eq!(s.message_text.as_str(), "#fff");
        assert!(s.avatar_url.is_empty());
    }
}
