//! End-to-end tests for quire-sheets-xlsx.
//!
//! Each test builds the package it needs the way a spreadsheet application
//! lays it out (extra parts such as themes and document properties, markup
//! extensions, entries in producer order), saves it to a temporary file and
//! reads it back with `XlsxReader`.

mod common;
mod reading;

pub use common::*;
