/// Sender name used when the identity carries no display name
pub const ANONYMOUS_SENDER: &str = "Anonymous";

/// Default message bubble background colour
pub const DEFAULT_MESSAGE_BG: &str = "#007a5a";

/// Default message bubble text colour
pub const DEFAULT_MESSAGE_TEXT: &str = "#fff";

/// Preset swatches offered for the bubble background
pub const MESSAGE_BG_PRESETS: &[&str] = &[
    "#007a5a", "#1976D2", "#6C63FF", "#e6e6fa", "#f0f2f5", "#fff", "#000",
];

/// Preset swatches offered for the bubble text
pub const MESSAGE_TEXT_PRESETS: &[&str] = &["#fff", "#000", "#1976D2", "#6C63FF", "#007a5a"];

/// Giphy search endpoint
pub const GIPHY_SEARCH_URL: &str = "https://api.giphy.com/v1/gifs/search";

/// Number of GIFs requested per search
pub const GIPHY_DEFAULT_LIMIT: u32 = 24;

/// Content rating passed to Giphy
pub const GIPHY_DEFAULT_RATING: &str = "g";

/// Language passed to Giphy
pub const GIPHY_DEFAULT_LANG: &str = "en";

/// Legacy ChatEngine endpoint used by the credential login
pub const CHAT_ENGINE_CHATS_URL: &str = "https://api.chatengine.io/chats";

/// Inline text shown when the legacy login is rejected
pub const LEGACY_LOGIN_ERROR: &str = "Oops, incorrect credentials.";

/// Generic dialog text for GIF search failures
pub const GIF_SEARCH_ERROR: &str = "Could not fetch GIFs. Please try again.";

/// Local storage key holding the last selected channel
pub const KEY_LAST_CHANNEL: &str = "lastChannelId";

/// Local storage keys holding the legacy credentials
pub const KEY_LEGACY_USERNAME: &str = "username";
pub const KEY_LEGACY_PASSWORD: &str = "password";

/// Blob path prefixes
pub const IMAGE_PREFIX: &str = "images";
pub const AVATAR_PREFIX: &str = "avatars";

/// Maximum upload size in bytes (10 MiB)
pub const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Viewport width at or below which the compact layout is used
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

/// Touch hold duration that opens a message menu
pub const LONG_PRESS_MS: u64 = 500;
