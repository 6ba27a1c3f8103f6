//! Prelude module - common imports for quire-sheets users
//!
//! ```rust
//! use quire_sheets::prelude::*;
//! ```

pub use crate::{
    // Entry points
    open_workbook,
    open_workbook_from_bytes,
    save_workbook,
    save_workbook_to_bytes,
    save_workbook_to_writer,
    // Style types
    BorderEdge,
    BorderLineStyle,
    BorderStyle,
    // Cell types
    CellAddress,
    CellRange,
    CellValue,
    Color,
    // Error types
    Error,
    FillStyle,
    FontStyle,
    NumberFormat,
    PatternType,
    // I/O types
    ReadOptions,
    Result,
    Style,
    Underline,
    // Main types
    Workbook,
    WriteOptions,
    XlsxError,
    XlsxReader,
    XlsxResult,
    XlsxWriter,
};
