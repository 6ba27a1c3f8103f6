//! # quire-sheets-core
//!
//! In-memory workbook model for the quire-sheets spreadsheet library.
//!
//! This crate provides the types every other quire-sheets crate works on:
//! - [`Workbook`], [`Sheet`], [`Row`], [`Cell`] - The document structure
//! - [`CellValue`] - The value kinds a cell can hold
//! - [`CellAddress`] and [`CellRange`] - A1-style references
//! - [`SharedStringTable`] - Deduplicated cell text
//! - [`StyleTable`] - Deduplicated fonts, fills, borders and number formats
//!
//! ## Example
//!
//! ```rust
//! use quire_sheets_core::{CellValue, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let idx = workbook.add_sheet("产品").unwrap();
//!
//! let mut sheet = workbook.sheet_mut(idx).unwrap();
//! sheet.set_cell_value("B2", "Iced Lemon Tea").unwrap();
//! sheet.set_cell_value("F2", 5.95).unwrap();
//! sheet.set_cell_value_at(1, 6, false).unwrap();
//!
//! let sheet = workbook.sheet(idx).unwrap();
//! assert_eq!(sheet.value("B2").unwrap(), CellValue::SharedString(0));
//! ```

pub mod cell;
pub mod column;
pub mod error;
pub mod row;
pub mod shared_strings;
pub mod sheet;
pub mod style;
pub mod workbook;

// Re-exports for convenience
pub use cell::{Cell, CellAddress, CellInput, CellKind, CellRange, CellValue, NumberText};
pub use column::ColumnWidth;
pub use error::{Error, Result};
pub use row::Row;
pub use shared_strings::SharedStringTable;
pub use sheet::{Sheet, SheetEditor};
pub use workbook::Workbook;

pub use style::{
    BorderEdge, BorderLineStyle, BorderStyle, CellFormat, Color, FillStyle, FontStyle,
    NumberFormat, PatternType, Style, StyleTable, Tint, Underline,
};

/// Maximum number of rows in a sheet
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a sheet
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name, in characters
pub const MAX_SHEET_NAME_LEN: usize = 31;
