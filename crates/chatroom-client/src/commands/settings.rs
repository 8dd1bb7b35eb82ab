use tracing::info;

use chatroom_store::UserSettings;

use super::logged;
use crate::client::ChatClient;
use crate::error::Result;
use crate::session::IdentityProvider;
use crate::settings::SettingsForm;

impl<P: IdentityProvider> ChatClient<P> {
    /// Open the settings modal seeded from the loaded settings.
    pub fn open_settings(&mut self) -> &mut SettingsForm {
        let settings = self.state.settings.clone();
        self.state
            .settings_form
            .insert(SettingsForm::seeded(&settings))
    }

    pub fn close_settings(&mut self) {
        self.state.settings_form = None;
    }

    /// Save the open form. The in-memory settings change first so that the
    /// next message uses them even if the write fails.
    pub async fn save_settings(&mut self) -> Result<Option<UserSettings>> {
        let Some(form) = self.state.settings_form.take() else {
            return Ok(None);
        };
        let result = self.require_identity().and_then(|identity| {
            self.state.settings = form.to_settings();
            Ok(self.store.merge_settings(&identity.uid, &form.to_patch())?)
        });
        let saved = logged("save-settings", result)?;

        info!(bg = %saved.message_bg, fg = %saved.message_text, "Settings applied");
        self.state.settings = saved.clone();
        Ok(Some(saved))
    }

    /// Shortcut for the colour pickers: set both colours and save.
    pub async fn set_message_colors(
        &mut self,
        background: &str,
        text: Option<&str>,
    ) -> Result<Option<UserSettings>> {
        let form = self.open_settings();
        let applied = form.set_background(background).and_then(|()| match text {
            Some(text) => form.set_text_color(text),
            None => Ok(()),
        });
        if let Err(e) = logged("set-colors", applied.map_err(Into::into)) {
            self.close_settings();
            return Err(e);
        }
        self.save_settings().await
    }
}
