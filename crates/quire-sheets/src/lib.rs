//! # quire-sheets
//!
//! A Rust library for reading and writing OOXML spreadsheet packages
//! (`.xlsx`).
//!
//! The in-memory model lives in `quire-sheets-core` and the package codec in
//! `quire-sheets-xlsx`; this crate re-exports both and adds path-, writer-
//! and byte-oriented entry points.
//!
//! ## Features
//!
//! - Read and write XLSX packages
//! - Shared string deduplication
//! - Cell styling (fonts, colors, fills, borders, number formats)
//! - Column widths and auto-filter ranges
//!
//! ## Example
//!
//! ```rust
//! use quire_sheets::prelude::*;
//!
//! let mut workbook = Workbook::new();
//! let idx = workbook.add_sheet("产品").unwrap();
//!
//! let price = workbook
//!     .styles_mut()
//!     .intern_style(&Style::new().number_format("#,##0.00"))
//!     .unwrap();
//!
//! let mut sheet = workbook.sheet_mut(idx).unwrap();
//! sheet.set_cell_value("A1", "Iced Lemon Tea").unwrap();
//! sheet.set_cell_value("B1", 5.95).unwrap();
//! sheet.set_cell_style("B1", price).unwrap();
//!
//! let bytes = save_workbook_to_bytes(&workbook).unwrap();
//! let reopened = open_workbook_from_bytes(&bytes).unwrap();
//! assert_eq!(reopened, workbook);
//! ```

pub mod prelude;

use std::io::Write;
use std::path::Path;

// Re-export core types
pub use quire_sheets_core::{
    BorderEdge,
    BorderLineStyle,
    BorderStyle,
    // Cell types
    Cell,
    CellAddress,
    CellFormat,
    CellInput,
    CellKind,
    CellRange,
    CellValue,
    Color,
    ColumnWidth,
    // Error types
    Error,
    FillStyle,
    FontStyle,
    NumberFormat,
    NumberText,
    PatternType,
    Result,
    Row,
    SharedStringTable,
    Sheet,
    SheetEditor,
    // Style types
    Style,
    StyleTable,
    Tint,
    Underline,
    // Main types
    Workbook,
    MAX_COLS,
    // Constants
    MAX_ROWS,
    MAX_SHEET_NAME_LEN,
};

// Re-export I/O types
pub use quire_sheets_xlsx::{
    Compression, ReadOptions, ReadSession, ReadStage, UnsupportedPolicy, WriteOptions,
    WriteSession, WriteStage, XlsxError, XlsxReader, XlsxResult, XlsxWriter,
};

/// Open a workbook from an `.xlsx` file
pub fn open_workbook<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
    XlsxReader::read_file(path)
}

pub fn open_workbook_with<P: AsRef<Path>>(path: P, options: &ReadOptions) -> XlsxResult<Workbook> {
    XlsxReader::read_file_with(path, options)
}

/// Decode a workbook from package bytes held in memory
pub fn open_workbook_from_bytes(bytes: &[u8]) -> XlsxResult<Workbook> {
    XlsxReader::read_bytes(bytes)
}

pub fn open_workbook_from_bytes_with(bytes: &[u8], options: &ReadOptions) -> XlsxResult<Workbook> {
    XlsxReader::read_bytes_with(bytes, options)
}

/// Save a workbook to an `.xlsx` file
///
/// The file is replaced only once the new package is complete; on error any
/// existing file at `path` is left as it was.
pub fn save_workbook<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsxResult<()> {
    XlsxWriter::write_file(workbook, path)
}

pub fn save_workbook_with<P: AsRef<Path>>(
    workbook: &Workbook,
    path: P,
    options: &WriteOptions,
) -> XlsxResult<()> {
    XlsxWriter::write_file_with(workbook, path, options)
}

/// Save a workbook to any writer
pub fn save_workbook_to_writer<W: Write>(workbook: &Workbook, writer: W) -> XlsxResult<()> {
    XlsxWriter::write(workbook, writer)
}

pub fn save_workbook_to_writer_with<W: Write>(
    workbook: &Workbook,
    writer: W,
    options: &WriteOptions,
) -> XlsxResult<()> {
    XlsxWriter::write_with(workbook, writer, options)
}

/// Encode a workbook into package bytes
pub fn save_workbook_to_bytes(workbook: &Workbook) -> XlsxResult<Vec<u8>> {
    XlsxWriter::write_bytes(workbook)
}

pub fn save_workbook_to_bytes_with(workbook: &Workbook, options: &WriteOptions) -> XlsxResult<Vec<u8>> {
    XlsxWriter::write_bytes_with(workbook, options)
}
