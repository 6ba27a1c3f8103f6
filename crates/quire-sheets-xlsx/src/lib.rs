//! # quire-sheets-xlsx
//!
//! XLSX (Office Open XML) package reader and writer for quire-sheets.
//!
//! Reading and writing are both staged: [`ReadSession`] goes from raw bytes
//! to a [`Workbook`](quire_sheets_core::Workbook) through explicit steps, and
//! [`WriteSession`] does the reverse. [`XlsxReader`] and [`XlsxWriter`] run
//! all the steps in one call.
//!
//! ```no_run
//! use quire_sheets_xlsx::{XlsxReader, XlsxWriter};
//!
//! let workbook = XlsxReader::read_file("prices.xlsx")?;
//! XlsxWriter::write_file(&workbook, "prices-copy.xlsx")?;
//! # Ok::<(), quire_sheets_xlsx::XlsxError>(())
//! ```

pub mod archive;
pub mod error;
pub mod options;
pub mod parts;
pub mod reader;
pub mod writer;
pub mod xml;

pub use error::{XlsxError, XlsxResult};
pub use options::{Compression, ReadOptions, UnsupportedPolicy, WriteOptions};
pub use reader::{ReadSession, ReadStage, XlsxReader};
pub use writer::{WriteSession, WriteStage, XlsxWriter};
