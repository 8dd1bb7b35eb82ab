use thiserror::Error;

/// Client-side validation failures. These never reach the stores.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Message needs text, an image or a GIF")]
    EmptyMessage,

    #[error("Channel name cannot be empty")]
    EmptyChannelName,

    #[error("Invalid colour: {0}")]
    InvalidColor(String),

    #[error("Edited text cannot be empty")]
    EmptyEdit,

    #[error("Edited text is unchanged")]
    UnchangedEdit,

    #[error("Only the sender can change this message")]
    NotOwner,

    #[error("Invalid file name: {0}")]
    InvalidFileName(String),
}
