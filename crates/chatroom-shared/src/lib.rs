// Types and rules shared by the chatroom store and client.

pub mod color;
pub mod constants;
pub mod error;
pub mod payload;
pub mod types;

pub use color::HexColor;
pub use error::ValidationError;
pub use payload::{validate_edit, MessagePayload};
pub use types::{ChannelId, Identity, MessageId, UserId};
