//! Local draft for the next outgoing message.

use std::path::Path;

use bytes::Bytes;

use chatroom_shared::ValidationError;

/// An image picked for upload, not yet stored anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingImage {
    pub file_name: String,
    pub data: Bytes,
}

impl PendingImage {
    /// Keep only the final path component of a picked file name.
    pub fn new(file_name: &str, data: impl Into<Bytes>) -> Result<Self, ValidationError> {
        let file_name = Path::new(file_name.trim())
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ValidationError::InvalidFileName(file_name.to_string()))?;
        Ok(Self {
            file_name: file_name.to_string(),
            data: data.into(),
        })
    }
}

/// Keyboard input relevant to the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerKey {
    Enter { shift: bool },
    Char(char),
    Backspace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerAction {
    None,
    Submit,
}

#[derive(Debug, Default, Clone)]
pub struct Composer {
    pub text: String,
    pub pending_image: Option<PendingImage>,
    pub pending_gif: Option<String>,
}

impl Composer {
    /// Enter submits; shift+Enter inserts a newline.
    pub fn handle_key(&mut self, key: ComposerKey) -> ComposerAction {
        match key {
            ComposerKey::Enter { shift: false } => return ComposerAction::Submit,
            ComposerKey::Enter { shift: true } => self.text.push('\n'),
            ComposerKey::Char(c) => self.text.push(c),
            ComposerKey::Backspace => {
                self.text.pop();
            }
        }
        ComposerAction::None
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn attach_image(&mut self, image: PendingImage) {
        self.pending_image = Some(image);
    }

    pub fn has_payload(&self) -> bool {
        !self.text.trim().is_empty() || self.pending_image.is_some() || self.pending_gif.is_some()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.pending_image = None;
        self.pending_gif = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_submits_shift_enter_breaks_line() {
        let mut composer = Composer::default();
        for c in "hi".chars() {
            composer.handle_key(ComposerKey::Char(c));
        }
        assert_eq!(
            composer.handle_key(ComposerKey::Enter { shift: true }),
            ComposerAction::None
        );
        composer.handle_key(ComposerKey::Char('!'));
        assert_eq!(composer.text, "hi\n!");

        assert_eq!(
            composer.handle_key(ComposerKey::Enter { shift: false }),
            ComposerAction::Submit
        );
        composer.handle_key(ComposerKey::Backspace);
        assert_eq!(composer.text, "hi\n");
    }

    #[test]
    fn test_payload_detection() {
        let mut composer = Composer::default();
        composer.set_text("   ");
        assert!(!composer.has_payload());

        composer.attach_image(PendingImage::new("cat.png", vec![1, 2, 3]).unwrap());
        assert!(composer.has_payload());

        composer.clear();
        assert!(!composer.has_payload());
        assert!(composer.text.is_empty());
    }

    #[test]
    fn test_image_name_is_reduced_to_file_name() {
        let image = PendingImage::new("/home/ada/Pictures/cat.png", vec![0]).unwrap();
        assert_eq!(image.file_name, "cat.png");
        assert!(PendingImage::new("   ", vec![0]).is_err());
        assert!(PendingImage::new("..", vec![0]).is_err());
    }
}
