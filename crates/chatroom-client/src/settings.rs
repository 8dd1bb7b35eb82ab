//! Settings modal state.

use uuid::Uuid;

use chatroom_shared::constants::{AVATAR_PREFIX, MESSAGE_BG_PRESETS, MESSAGE_TEXT_PRESETS};
use chatroom_shared::{HexColor, ValidationError};
use chatroom_store::{SettingsPatch, UserSettings};

/// Blob path for an uploaded avatar: `avatars/{uuid}-{file_name}`.
pub fn avatar_path(file_name: &str) -> String {
    format!("{AVATAR_PREFIX}/{}-{file_name}", Uuid::new_v4())
}

pub fn background_presets() -> impl Iterator<Item = HexColor> {
    MESSAGE_BG_PRESETS.iter().filter_map(|c| HexColor::parse(c).ok())
}

pub fn text_presets() -> impl Iterator<Item = HexColor> {
    MESSAGE_TEXT_PRESETS.iter().filter_map(|c| HexColor::parse(c).ok())
}

/// Editable copy of the user's settings, seeded when the modal opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    pub avatar_url: String,
    pub message_bg: HexColor,
    pub message_text: HexColor,
}

impl SettingsForm {
    pub fn seeded(settings: &UserSettings) -> Self {
        Self {
            avatar_url: settings.avatar_url.clone(),
            message_bg: settings.message_bg.clone(),
            message_text: settings.message_text.clone(),
        }
    }

    /// Paste an avatar URL directly.
    pub fn set_avatar_url(&mut self, url: &str) {
        self.avatar_url = url.trim().to_string();
    }

    pub fn set_background(&mut self, color: &str) -> Result<(), ValidationError> {
        self.message_bg = HexColor::parse(color)?;
        Ok(())
    }

    pub fn set_text_color(&mut self, color: &str) -> Result<(), ValidationError> {
        self.message_text = HexColor::parse(color)?;
        Ok(())
    }

    pub fn to_settings(&self) -> UserSettings {
        UserSettings {
            avatar_url: self.avatar_url.clone(),
            message_bg: self.message_bg.clone(),
            message_text: self.message_text.clone(),
        }
    }

    pub fn to_patch(&self) -> SettingsPatch {
        SettingsPatch::from(&self.to_settings())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_path_shape() {
        let path = avatar_path("me.png");
        let rest = path.strip_prefix("avatars/").unwrap();
        let (uuid, name) = rest.split_at(36);
        assert!(Uuid::parse_str(uuid).is_ok());
        assert_eq!(name, "-me.png");
        assert_ne!(avatar_path("me.png"), path);
    }

    #[test]
    fn test_presets_are_valid() {
        assert_eq!(background_presets().count(), MESSAGE_BG_PRESETS.len());
        assert_eq!(text_presets().count(), MESSAGE_TEXT_PRESETS.len());
    }

    #[test]
    fn test_form_edits_and_patch() {
        let mut form = SettingsForm::seeded(&UserSettings::default());
        form.set_background("#1976D2").unwrap();
        assert!(form.set_text_color("blue").is_err());
        form.set_avatar_url("  file:///a.png ");

        let patch = form.to_patch();
        assert_eq!(patch.message_bg.unwrap().as_str(), "#1976D2");
        assert_eq!(patch.message_text.unwrap().as_str(), "#fff");
        assert_eq!(patch.avatar_url.as_deref(), Some("file:///a.png"));
    }
}
