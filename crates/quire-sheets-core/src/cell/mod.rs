//! Cell-related types and utilities
//!
//! This module contains:
//! - [`Cell`] - A cell's reference, value and style index
//! - [`CellValue`] - The value stored in a cell
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A range of cells (e.g., "A1:B10")

mod address;
mod value;

pub use address::{CellAddress, CellRange};
pub use value::{CellInput, CellKind, CellValue, NumberText};

/// A single cell: reference, value and optional style index
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    address: CellAddress,
    value: CellValue,
    style_index: Option<u32>,
}

impl Cell {
    pub(crate) fn new(address: CellAddress) -> Self {
        Self {
            address,
            value: CellValue::Empty,
            style_index: None,
        }
    }

    /// The cell's reference
    pub fn address(&self) -> CellAddress {
        self.address
    }

    /// The cell's value
    pub fn value(&self) -> &CellValue {
        &self.value
    }

    /// Kind of the stored value
    pub fn kind(&self) -> CellKind {
        self.value.kind()
    }

    /// Style index into the workbook's style table (None = default format 0)
    pub fn style_index(&self) -> Option<u32> {
        self.style_index
    }

    /// Effective style index, treating a missing index as the default format
    pub fn effective_style_index(&self) -> u32 {
        self.style_index.unwrap_or(0)
    }

    pub(crate) fn set_value(&mut self, value: CellValue) {
        self.value = value;
    }

    pub(crate) fn set_style_index(&mut self, style_index: Option<u32>) {
        self.style_index = style_index;
    }
}
