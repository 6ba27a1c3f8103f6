//! Cell styling types
//!
//! This module contains types for cell formatting:
//! - [`StyleTable`] - The workbook's deduplicated style records
//! - [`CellFormat`] - A cell format record referenced by a cell's style index
//! - [`Style`] - High-level description interned through [`StyleTable::intern_style`]
//! - [`FontStyle`], [`FillStyle`], [`BorderStyle`], [`NumberFormat`] - Components
//! - [`Color`] - Color representation

mod border;
mod color;
mod fill;
mod font;
mod number_format;
mod table;

pub use border::{BorderEdge, BorderLineStyle, BorderStyle};
pub use color::{Color, Tint};
pub use fill::{FillStyle, PatternType};
pub use font::{FontStyle, Underline};
pub use number_format::{builtin_format_code, NumberFormat, FIRST_CUSTOM_NUM_FMT_ID};
pub use table::{CellFormat, StyleTable};

/// Complete cell style
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    /// Font settings
    pub font: FontStyle,
    /// Fill/background settings
    pub fill: FillStyle,
    /// Border settings
    pub border: BorderStyle,
    /// Number format
    pub number_format: NumberFormat,
}

impl Style {
    /// Create a new default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font to bold
    pub fn bold(mut self, bold: bool) -> Self {
        self.font.bold = bold;
        self
    }

    /// Set font to italic
    pub fn italic(mut self, italic: bool) -> Self {
        self.font.italic = italic;
        self
    }

    /// Set font size in points
    pub fn font_size(mut self, size: f64) -> Self {
        self.font.size = size;
        self
    }

    /// Set font name
    pub fn font_name<S: Into<String>>(mut self, name: S) -> Self {
        self.font.name = name.into();
        self
    }

    /// Set font color
    pub fn font_color(mut self, color: Color) -> Self {
        self.font.color = color;
        self
    }

    /// Set fill color (solid fill)
    pub fn fill_color(mut self, color: Color) -> Self {
        self.fill = FillStyle::solid(color);
        self
    }

    /// Set borders
    pub fn border(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    /// Set a custom number format code
    pub fn number_format<S: Into<String>>(mut self, format: S) -> Self {
        self.number_format = NumberFormat::Custom(format.into());
        self
    }

    /// Set a built-in or custom number format
    pub fn with_number_format(mut self, format: NumberFormat) -> Self {
        self.number_format = format;
        self
    }
}
