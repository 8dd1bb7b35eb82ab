//! Client configuration loaded from environment variables.
//!
//! Everything has a default so the client starts with zero configuration;
//! only GIF search needs a key to return results.

use std::path::PathBuf;

use chatroom_shared::constants::{
    GIPHY_DEFAULT_LANG, GIPHY_DEFAULT_LIMIT, GIPHY_DEFAULT_RATING, GIPHY_SEARCH_URL,
    MAX_UPLOAD_SIZE,
};

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root for the database, blob directory and local storage file.
    /// Env: `CHATROOM_DATA_DIR`
    /// Default: platform data directory (`None` here, resolved on open).
    pub data_dir: Option<PathBuf>,

    /// Giphy API key.
    /// Env: `GIPHY_API_KEY`
    /// Default: empty (searches are sent anyway and fail upstream).
    pub giphy_api_key: String,

    /// Env: `GIPHY_ENDPOINT`
    pub giphy_endpoint: String,

    /// Env: `GIPHY_LIMIT`
    /// Default: `24`
    pub giphy_limit: u32,

    /// Env: `GIPHY_RATING`
    pub giphy_rating: String,

    /// Env: `GIPHY_LANG`
    pub giphy_lang: String,

    /// Largest accepted image or avatar upload, in bytes.
    /// Env: `MAX_UPLOAD_SIZE`
    pub max_upload_size: usize,

    // -- Local identity profile --

    /// Env: `CHATROOM_USER_ID`
    /// Default: the OS user name, if any.
    pub user_id: Option<String>,

    /// Env: `CHATROOM_DISPLAY_NAME`
    pub display_name: Option<String>,

    /// Env: `CHATROOM_AVATAR_URL`
    pub avatar_url: Option<String>,

    /// ChatEngine project for the legacy credential check.
    /// Env: `CHAT_ENGINE_PROJECT_ID`
    pub chat_engine_project_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            giphy_api_key: String::new(),
            giphy_endpoint: GIPHY_SEARCH_URL.to_string(),
            giphy_limit: GIPHY_DEFAULT_LIMIT,
            giphy_rating: GIPHY_DEFAULT_RATING.to_string(),
            giphy_lang: GIPHY_DEFAULT_LANG.to_string(),
            max_upload_size: MAX_UPLOAD_SIZE,
            user_id: None,
            display_name: None,
            avatar_url: None,
            chat_engine_project_id: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = non_empty(lookup("CHATROOM_DATA_DIR")) {
            config.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(key) = lookup("GIPHY_API_KEY") {
            config.giphy_api_key = key;
        }

        if let Some(endpoint) = non_empty(lookup("GIPHY_ENDPOINT")) {
            config.giphy_endpoint = endpoint;
        }

        if let Some(val) = lookup("GIPHY_LIMIT") {
            match val.parse::<u32>() {
                Ok(n) if n > 0 => config.giphy_limit = n,
                _ => tracing::warn!(value = %val, "Invalid GIPHY_LIMIT, using default"),
            }
        }

        if let Some(rating) = non_empty(lookup("GIPHY_RATING")) {
            config.giphy_rating = rating;
        }

        if let Some(lang) = non_empty(lookup("GIPHY_LANG")) {
            config.giphy_lang = lang;
        }

        if let Some(val) = lookup("MAX_UPLOAD_SIZE") {
            match val.parse::<usize>() {
                Ok(n) if n > 0 => config.max_upload_size = n,
                _ => tracing::warn!(value = %val, "Invalid MAX_UPLOAD_SIZE, using default"),
            }
        }

        // -- Identity profile --

        config.user_id = non_empty(lookup("CHATROOM_USER_ID"))
            .or_else(|| non_empty(lookup("USER")))
            .or_else(|| non_empty(lookup("USERNAME")));
        config.display_name = non_empty(lookup("CHATROOM_DISPLAY_NAME"));
        config.avatar_url = non_empty(lookup("CHATROOM_AVATAR_URL"));
        config.chat_engine_project_id = non_empty(lookup("CHAT_ENGINE_PROJECT_ID"));

        config
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
