//! Hex RGB colors and their 8-bit watch representation.
//!
//! The settings page stores colors as six hex digits (`"007DCE"`).  The watch
//! display only has two bits per channel, so the watch reduces every color it
//! receives to a single `argb` byte.  [`GColor8::from_hex`] performs the same
//! reduction the watch firmware does, which lets the settings host preview
//! exactly what will be drawn.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string is not a six-digit hex color.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    /// The string does not contain exactly six digits after the prefix.
    #[error("hex color must have exactly 6 digits, got {0:?}")]
    Length(String),

    /// The string contains a character that is not a hex digit.
    #[error("hex color contains a non-hex character: {0:?}")]
    NotHex(String),
}

/// A six-digit hex RGB color, stored upper-case without prefix.
///
/// # Example
///
/// ```rust
/// use halfhalf_core::HexColor;
///
/// let c: HexColor = "#007dce".parse().unwrap();
/// assert_eq!(c.as_str(), "007DCE");
/// assert_eq!(c.rgb(), 0x007DCE);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Parses `s`, accepting an optional `#` or `0x` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError`] when the remainder is not six hex digits.
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        let digits = s
            .strip_prefix('#')
            .or_else(|| s.strip_prefix("0x"))
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.len() != 6 {
            return Err(ColorError::Length(s.to_string()));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::NotHex(s.to_string()));
        }
        Ok(Self(digits.to_ascii_uppercase()))
    }

    /// The normalized six-digit string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 24-bit `0xRRGGBB` value.
    pub fn rgb(&self) -> u32 {
        // Validated on construction: six hex digits always fit.
        u32::from_str_radix(&self.0, 16).unwrap_or_default()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.0
    }
}

/// An 8-bit watch color: `0bAARRGGBB`, two bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GColor8 {
    /// Packed alpha/red/green/blue.
    pub argb: u8,
}

impl GColor8 {
    /// Opaque white.
    pub const WHITE: GColor8 = GColor8 { argb: 0xFF };
    /// Opaque black.
    pub const BLACK: GColor8 = GColor8 { argb: 0xC0 };
    /// The watch palette's "Blue Moon" (`0x0055FF`).
    pub const BLUE_MOON: GColor8 = GColor8 { argb: 0xC7 };

    /// Reduces 8-bit channels to the watch's 2-bit channels, fully opaque.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            argb: 0b1100_0000 | ((r >> 6) << 4) | ((g >> 6) << 2) | (b >> 6),
        }
    }

    /// Reduces a `0xRRGGBB` value.
    pub fn from_hex(rgb: u32) -> Self {
        Self::from_rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }
}

impl From<&HexColor> for GColor8 {
    fn from(value: &HexColor) -> Self {
        GColor8::from_hex(value.rgb())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
