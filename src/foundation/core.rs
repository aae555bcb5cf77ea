use crate::foundation::error::{MorphcastError, MorphcastResult};
use std::fmt;
use std::str::FromStr;

/// Opaque 8-bit sRGB color, the only paint representation diagrams carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a strict `#RRGGBB` hex triplet (case-insensitive digits).
    ///
    /// Short (`#rgb`), alpha (`#rrggbbaa`) and named colors are rejected.
    pub fn parse_hex(s: &str) -> MorphcastResult<Self> {
        let Some(digits) = s.strip_prefix('#') else {
            return Err(MorphcastError::color(format!(
                "\"{s}\" is not a #RRGGBB color"
            )));
        };
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(MorphcastError::color(format!(
                "\"{s}\" is not a #RRGGBB color"
            )));
        }

        fn hex_byte(pair: &str) -> MorphcastResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| MorphcastError::color(format!("invalid hex byte \"{pair}\"")))
        }

        Ok(Self {
            r: hex_byte(&digits[0..2])?,
            g: hex_byte(&digits[2..4])?,
            b: hex_byte(&digits[4..6])?,
        })
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb8 {
    type Err = MorphcastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
