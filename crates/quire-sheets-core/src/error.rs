//! Error types for quire-sheets-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or querying the workbook model
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Invalid cell range format
    #[error("Invalid cell range: {0}")]
    InvalidRange(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u32, u16),

    /// Sheet index out of bounds
    #[error("Sheet index {0} out of bounds (count: {1})")]
    SheetOutOfBounds(usize, usize),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// Sheet id of zero
    #[error("Invalid sheet id {0} (ids start at 1)")]
    InvalidSheetId(u32),

    /// Sheet id already used by another sheet
    #[error("Sheet id already exists: {0}")]
    DuplicateSheetId(u32),

    /// Lookup into one of the workbook tables with an index it does not hold
    #[error("{table} index {index} out of range (len: {len})")]
    IndexOutOfRange {
        table: &'static str,
        index: u32,
        len: usize,
    },

    /// Numeric payload that is not a finite decimal literal
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    /// Theme tint outside -1.0..=1.0
    #[error("Invalid tint {0} (expected -1.0..=1.0)")]
    InvalidTint(f64),

    /// Font size that is not a positive finite number of points
    #[error("Invalid font size: {0}")]
    InvalidFontSize(f64),

    /// Custom numbering format ids exhausted
    #[error("No numbering format id left after {0}")]
    NumberFormatIdsExhausted(u32),

    /// Column bounds that are reversed or outside the sheet
    #[error("Invalid column range {min}..={max}")]
    InvalidColumnRange { min: u16, max: u16 },

    /// Column-width range that overlaps an existing override
    #[error("Columns {min}..={max} overlap an existing width override")]
    OverlappingColumns { min: u16, max: u16 },
}

pub(crate) fn out_of_range(table: &'static str, index: u32, len: usize) -> Error {
    Error::IndexOutOfRange { table, index, len }
}
