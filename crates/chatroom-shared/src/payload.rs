//! Message content rules shared by the composer and the store.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The user-supplied part of a message. At least one field is always set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    text: Option<String>,
    image_url: Option<String>,
    gif_url: Option<String>,
}

impl MessagePayload {
    /// Build a payload, trimming the text and dropping blank parts.
    pub fn new(
        text: Option<&str>,
        image_url: Option<String>,
        gif_url: Option<String>,
    ) -> Result<Self, ValidationError> {
        let text = text.map(str::trim).filter(|t| !t.is_empty()).map(String::from);
        let image_url = image_url.filter(|u| !u.trim().is_empty());
        let gif_url = gif_url.filter(|u| !u.trim().is_empty());

        if text.is_none() && image_url.is_none() && gif_url.is_none() {
            return Err(ValidationError::EmptyMessage);
        }
        Ok(Self {
            text,
            image_url,
            gif_url,
        })
    }

    pub fn into_parts(self) -> (Option<String>, Option<String>, Option<String>) {
        (self.text, self.image_url, self.gif_url)
    }
}

/// Check an edit draft against the current text. Returns the text to save.
///
/// The draft is saved as typed; it only has to be non-blank and differ from
/// what is already stored.
pub fn validate_edit(current: Option<&str>, draft: &str) -> Result<String, ValidationError> {
    if draft.trim().is_empty() {
        return Err(ValidationError::EmptyEdit);
    }
    if current == Some(draft) {
        return Err(ValidationError::UnchangedEdit);
    }
    Ok(draft.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_only_is_empty() {
        assert_eq!(
            MessagePayload::new(Some("   \n"), None, None),
            Err(ValidationError::EmptyMessage)
        );
    }

    #[test]
    fn test_text_is_trimmed() {
        let p = MessagePayload::new(Some("  hello  "), None, None).unwrap();
        assert_eq!(p.into_parts().0.as_deref(), Some("hello"));
    }

    #[test]
    fn test_image_only_is_valid() {
        let p = MessagePayload::new(Some(""), Some("file:///x.png".into()), None).unwrap();
        let (text, image_url, gif_url) = p.into_parts();
        assert_eq!(text, None);
        assert_eq!(image_url.as_deref(), Some("file:///x.png"));
        assert_eq!(gif_url, None);
    }

    #[test]
    fn test_blank_urls_are_dropped() {
        assert!(MessagePayload::new(None, Some(" ".into()), Some(String::new())).is_err());
    }

    #[test]
    fn test_validate_edit() {
        assert_eq!(validate_edit(Some("hi"), "  "), Err(ValidationError::EmptyEdit));
        assert_eq!(validate_edit(Some("hi"), "hi"), Err(ValidationError::UnchangedEdit));
        assert_eq!(validate_edit(Some("hi"), "hi!").unwrap(), "hi!");
        assert_eq!(validate_edit(None, "new").unwrap(), "new");
    }
}
