use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// An sRGB color parsed from a CSS-style hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Creates a color from its 8-bit sRGB channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rgb` or `#rrggbb` (the leading `#` is optional).
    ///
    /// # Errors
    ///
    /// Returns `SceneError::InvalidColor` for any other input.
    pub fn from_hex(s: &str) -> Result<Self, SceneError> {
        let invalid = || SceneError::InvalidColor(s.to_owned());
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => Ok(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }

    /// Returns the color as linear-light RGB components in `[0, 1]`.
    #[must_use]
    pub fn to_linear(self) -> [f64; 3] {
        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        ]
    }
}

fn srgb_to_linear(c: u8) -> f64 {
    let c = f64::from(c) / 255.0;
    if c < 0.04045 {
        c * 0.077_399_380_6
    } else {
        (c * 0.947_867_298_6 + 0.052_132_701_4).powf(2.4)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = SceneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parses_long_and_short_forms() {
        assert_eq!(Color::from_hex("#112233").unwrap(), Color::rgb(0x11, 0x22, 0x33));
        assert_eq!(Color::from_hex("8B4513").unwrap(), Color::rgb(0x8b, 0x45, 0x13));
        assert_eq!(Color::from_hex("#666").unwrap(), Color::rgb(0x66, 0x66, 0x66));
    }

    #[test]
    fn rejects_garbage() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#gggggg").is_err());
        assert!(Color::from_hex("").is_err());
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn displays_lowercase_hex() {
        assert_eq!(Color::rgb(0x8b, 0x45, 0x13).to_string(), "#8b4513");
    }

    #[test]
    fn linear_endpoints() {
        let [r, g, b] = Color::rgb(0, 255, 0).to_linear();
        assert_relative_eq!(r, 0.0);
        assert_relative_eq!(g, 1.0, epsilon = 1e-9);
        assert_relative_eq!(b, 0.0);
    }

    #[test]
    fn serde_uses_hex_strings() {
        let c: Color = serde_json::from_str("\"#aabbcc\"").unwrap();
        assert_eq!(c, Color::rgb(0xaa, 0xbb, 0xcc));
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#aabbcc\"");
        assert!(serde_json::from_str::<Color>("\"blue\"").is_err());
    }
}
