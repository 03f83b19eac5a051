//! Swatch colors.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Color`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// The input does not start with `#`.
    #[error("color must start with '#': {0}")]
    MissingHash(String),
    /// The input has a length other than `#rgb` or `#rrggbb`.
    #[error("color must be #rgb or #rrggbb: {0}")]
    BadLength(String),
    /// The input contains a non-hex digit.
    #[error("color contains a non-hex digit: {0}")]
    NotHex(String),
}

/// A CSS hex color, as carried by a swatch's `data-color` attribute.
///
/// Stored lowercased in its original `#rgb` or `#rrggbb` form, which the scene
/// graph accepts directly.
///
/// ## Examples
///
/// ```
/// use vibe_bagshop_core::Color;
///
/// let color = Color::parse("#B91C1C").unwrap();
/// assert_eq!(color.as_str(), "#b91c1c");
/// assert_eq!(color.rgb(), 0xb9_1c_1c);
/// assert!(Color::parse("red").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    /// Default viewer color before any swatch is chosen.
    pub const DEFAULT_HEX: &'static str = "#111827";

    /// Parse a `#rgb` / `#rrggbb` color.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a hex color of either length.
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        let trimmed = s.trim();
        let hex = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(s.to_owned()))?;

        if hex.len() != 3 && hex.len() != 6 {
            return Err(ColorError::BadLength(s.to_owned()));
        }

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::NotHex(s.to_owned()));
        }

        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Returns the color as a `#…` string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the color as a packed `0xRRGGBB` value.
    #[must_use]
    pub fn rgb(&self) -> u32 {
        let hex = self.0.trim_start_matches('#');
        let expanded: String = if hex.len() == 3 {
            hex.chars().flat_map(|c| [c, c]).collect()
        } else {
            hex.to_owned()
        };
        u32::from_str_radix(&expanded, 16).unwrap_or(0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self(Self::DEFAULT_HEX.to_owned())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_short_form_expands() {
        assert_eq!(Color::parse("#fa0").unwrap().rgb(), 0xff_aa_00);
    }

    #[test]
    fn test_default_is_charcoal() {
        assert_eq!(Color::default().rgb(), 0x11_18_27);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Color::parse("111827"),
            Err(ColorError::MissingHash(_))
        ));
        assert!(matches!(
            Color::parse("#1118"),
            Err(ColorError::BadLength(_))
        ));
        assert!(matches!(Color::parse("#11182g"), Err(ColorError::NotHex(_))));
    }

    #[test]
    fn test_deserialize_validates() {
        assert!(serde_json::from_str::<Color>("\"#b91c1c\"").is_ok());
        assert!(serde_json::from_str::<Color>("\"crimson\"").is_err());
    }
}
