//! Color representation

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};

/// Color used by fonts, fills and borders
///
/// [`Color::Auto`] means "no explicit color" and is written by omitting the
/// color element altogether.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// Automatic/default color
    #[default]
    Auto,

    /// ARGB color with alpha channel
    Argb { a: u8, r: u8, g: u8, b: u8 },

    /// Theme color with tint
    ///
    /// Theme indices:
    /// 0 = Background 1 (light)
    /// 1 = Text 1 (dark)
    /// 2 = Background 2
    /// 3 = Text 2
    /// 4-9 = Accent 1-6
    Theme {
        /// Theme color index (0-9)
        index: u8,
        /// Lightening (positive) or darkening (negative) applied to the theme color
        tint: Tint,
    },

    /// Indexed color (legacy palette)
    Indexed(u8),
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    /// Create an opaque RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Argb { a: 0xFF, r, g, b }
    }

    /// Create an ARGB color
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color::Argb { a, r, g, b }
    }

    /// Create an untinted theme color
    pub const fn theme(index: u8) -> Self {
        Color::Theme {
            index,
            tint: Tint::NONE,
        }
    }

    /// Create a theme color with a tint in `-1.0..=1.0`
    pub fn theme_tinted(index: u8, tint: f64) -> Result<Self> {
        Ok(Color::Theme {
            index,
            tint: Tint::new(tint)?,
        })
    }

    /// Parse a hex string ("FF0000", "#FF0000" or "FFFF0000")
    ///
    /// Six digits are treated as opaque.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Color::argb(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Eight-digit ARGB hex, for [`Color::Argb`] only
    pub fn to_argb_hex(&self) -> Option<String> {
        match self {
            Color::Argb { a, r, g, b } => Some(format!("{:02X}{:02X}{:02X}{:02X}", a, r, g, b)),
            _ => None,
        }
    }

    /// Check if color is automatic/default
    pub fn is_auto(&self) -> bool {
        matches!(self, Color::Auto)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Auto => write!(f, "auto"),
            Color::Argb { a, r, g, b } => write!(f, "#{:02X}{:02X}{:02X}{:02X}", a, r, g, b),
            Color::Theme { index, tint } => write!(f, "theme({}, tint {})", index, tint),
            Color::Indexed(i) => write!(f, "indexed({})", i),
        }
    }
}

/// Theme color tint, a finite value in `-1.0..=1.0` kept at full precision
///
/// `-0.0` is stored as `0.0`, so equal tints hash equally.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "f64", into = "f64")
)]
pub struct Tint(f64);

impl Tint {
    pub const NONE: Tint = Tint(0.0);

    pub fn new(value: f64) -> Result<Self> {
        if !(-1.0..=1.0).contains(&value) {
            return Err(Error::InvalidTint(value));
        }
        Ok(Tint(if value == 0.0 { 0.0 } else { value }))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_none(self) -> bool {
        self.0 == 0.0
    }
}

impl PartialEq for Tint {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Tint {}

impl Hash for Tint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl TryFrom<f64> for Tint {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Tint::new(value)
    }
}

impl From<Tint> for f64 {
    fn from(tint: Tint) -> f64 {
        tint.0
    }
}

impl fmt::Display for Tint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
