//! User actions on the [`ChatClient`](crate::client::ChatClient).
//!
//! Each sub-module adds an `impl ChatClient` block for one area. Every
//! action logs its own failure and returns it; the view state is left as it
//! was when an action fails.

pub mod channels;
pub mod files;
pub mod gifs;
pub mod identity;
pub mod messaging;
pub mod settings;

use tracing::error;

use crate::error::Result;

/// Log a failed action and hand the result back unchanged.
pub(crate) fn logged<T>(action: &'static str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        error!(action, error = %e, "Action failed");
    }
    result
}
