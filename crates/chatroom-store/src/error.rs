use thiserror::Error;

use chatroom_shared::ValidationError;

/// Errors produced by the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error (e.g. creating the database or blob directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A lookup by id found nothing.
    #[error("Record not found")]
    NotFound,

    /// Migration failure.
    #[error("Migration error: {0}")]
    Migration(String),

    /// A stored value failed validation on the way out.
    #[error("Invalid stored value: {0}")]
    Invalid(#[from] ValidationError),

    /// The shared connection mutex was poisoned by a panicking writer.
    #[error("Database lock poisoned")]
    LockPoisoned,

    /// Blob larger than the configured limit.
    #[error("Blob too large: {size} bytes (max {max})")]
    BlobTooLarge { size: usize, max: usize },

    /// Zero-length upload.
    #[error("Empty blob")]
    EmptyBlob,

    /// Blob path escapes the storage root or is malformed.
    #[error("Invalid blob path: {0}")]
    InvalidBlobPath(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
