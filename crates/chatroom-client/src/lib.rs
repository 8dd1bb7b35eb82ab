//! # chatroom-client
//!
//! View-model for the chatroom: session, channel directory, message
//! stream, composer, settings, GIF picker and layout state, driven by live
//! queries against the local document store.

pub mod channels;
pub mod client;
pub mod commands;
pub mod composer;
pub mod config;
pub mod error;
pub mod events;
pub mod gif;
pub mod layout;
pub mod legacy;
pub mod local_storage;
pub mod session;
pub mod settings;
pub mod state;
pub mod stream;

use tracing_subscriber::{fmt, EnvFilter};

pub use client::ChatClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use events::ClientEvent;
pub use session::{AuthState, IdentityProvider, LocalIdentityProvider};

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// filter. Output goes to stderr so it does not interleave with the chat.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("chatroom_client=debug,chatroom_store=info,warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
