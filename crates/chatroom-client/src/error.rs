use thiserror::Error;

use chatroom_shared::ValidationError;
use chatroom_store::StoreError;

/// Identity provider failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("No local profile configured (set CHATROOM_USER_ID)")]
    NoProfile,
}

/// GIF search failures.
#[derive(Error, Debug)]
pub enum GifError {
    #[error("GIF search request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GIF search returned status {0}")]
    Status(u16),

    #[error("Malformed GIF search response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Legacy ChatEngine login failures.
#[derive(Error, Debug)]
pub enum LegacyLoginError {
    #[error("No ChatEngine project configured")]
    NoProject,

    #[error("Login request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Credentials rejected (status {0})")]
    Rejected(u16),
}

/// Errors produced by the client layer.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Gif(#[from] GifError),

    #[error("Not signed in")]
    NotSignedIn,

    #[error("No channel selected")]
    NoChannelSelected,

    #[error("Local storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Local storage is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClientError>;
