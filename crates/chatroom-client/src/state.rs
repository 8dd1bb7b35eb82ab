//! View state owned by the [`ChatClient`](crate::client::ChatClient).
//!
//! Everything here is a read-through cache or local draft; the stores stay
//! the source of truth and live-query snapshots overwrite the cached parts.

use chatroom_store::UserSettings;

use crate::channels::ChannelDirectory;
use crate::composer::Composer;
use crate::gif::GifPicker;
use crate::layout::Layout;
use crate::settings::SettingsForm;
use crate::stream::{EditDraft, MessageStream};

/// Central view state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Channel list and the current selection.
    pub directory: ChannelDirectory,

    /// Messages of the selected channel, oldest first.
    pub stream: MessageStream,

    /// Draft for the next message.
    pub composer: Composer,

    /// GIF search modal.
    pub gif_picker: GifPicker,

    /// Settings used for outgoing messages. Defaults until loaded.
    pub settings: UserSettings,

    /// Open settings modal, if any.
    pub settings_form: Option<SettingsForm>,

    /// Message being edited, if any.
    pub edit: Option<EditDraft>,

    pub layout: Layout,
}

impl AppState {
    /// Drop everything tied to the signed-in user.
    pub(crate) fn reset_user_state(&mut self) {
        self.directory.clear_selection();
        self.stream.clear();
        self.composer.clear();
        self.gif_picker.close();
        self.settings = UserSettings::default();
        self.settings_form = None;
        self.edit = None;
    }
}
