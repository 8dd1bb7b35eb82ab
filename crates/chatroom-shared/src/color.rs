//! CSS-style hex colours used for message bubbles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MESSAGE_BG, DEFAULT_MESSAGE_TEXT};
use crate::error::ValidationError;

/// A `#rgb` or `#rrggbb` colour, stored exactly as entered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let value = value.trim();
        let digits = value
            .strip_prefix('#')
            .ok_or_else(|| ValidationError::InvalidColor(value.to_string()))?;

        let valid_len = digits.len() == 3 || digits.len() == 6;
        if !valid_len || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidColor(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    /// Bubble background used until the user picks one.
    pub fn default_background() -> Self {
        Self(DEFAULT_MESSAGE_BG.to_string())
    }

    /// Bubble text colour used until the user picks one.
    pub fn default_text() -> Self {
        Self(DEFAULT_MESSAGE_TEXT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for HexColor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(c: HexColor) -> Self {
        c.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_and_long() {
        assert_eq!(HexColor::parse("#fff").unwrap().as_str(), "#fff");
        assert_eq!(HexColor::parse("#007a5a").unwrap().as_str(), "#007a5a");
        assert_eq!(HexColor::parse("#1976D2").unwrap().as_str(), "#1976D2");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(HexColor::parse("fff").is_err());
        assert!(HexColor::parse("#ffff").is_err());
        assert!(HexColor::parse("#ggg").is_err());
        assert!(HexColor::parse("").is_err());
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(HexColor::parse(HexColor::default_background().as_str()).is_ok());
        assert!(HexColor::parse(HexColor::default_text().as_str()).is_ok());
    }

    #[test]
    fn test_serde_validates() {
        let ok: HexColor = serde_json::from_str("\"#000\"").unwrap();
        assert_eq!(ok.as_str(), "#000");
        assert!(serde_json::from_str::<HexColor>("\"red\"").is_err());
    }
}
