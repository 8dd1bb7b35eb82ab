//! # chatroom-store
//!
//! Local document store for the chatroom client, backed by SQLite.
//!
//! The crate holds three collections (channels, messages, per-user
//! settings) plus a file-backed blob store for uploaded images and avatars.
//! [`DocumentStore`] is the shared handle the client talks to: it assigns
//! ids and monotonic timestamps, and drives [`LiveQuery`] subscriptions that
//! push a full snapshot whenever a watched collection changes.

pub mod blob_store;
pub mod blobs;
pub mod channels;
pub mod database;
pub mod document_store;
pub mod live;
pub mod messages;
pub mod migrations;
pub mod models;
pub mod settings;

mod error;

pub use blob_store::BlobStore;
pub use database::{default_data_dir, Database, DATABASE_FILE};
pub use document_store::DocumentStore;
pub use error::{Result, StoreError};
pub use live::{Change, LiveQuery};
pub use models::*;
