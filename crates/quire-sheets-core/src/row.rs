//! Row types

use std::collections::BTreeMap;

use crate::cell::{Cell, CellAddress};

/// A row of cells, ordered by column index
///
/// Rows are sparse: only the columns that were set hold a [`Cell`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    /// Row number (1-based)
    number: u32,
    /// Cells keyed by 0-based column index
    cells: BTreeMap<u16, Cell>,
}

impl Row {
    /// Create an empty row with the given 1-based number
    pub fn new(number: u32) -> Self {
        Self {
            number,
            cells: BTreeMap::new(),
        }
    }

    /// Row number (1-based, as written in A1 references)
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Cells in column order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    /// Get a cell by 0-based column index
    pub fn cell(&self, col: u16) -> Option<&Cell> {
        self.cells.get(&col)
    }

    /// Number of cells in the row
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if row has any cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub(crate) fn cell_entry(&mut self, col: u16) -> &mut Cell {
        let row = self.number - 1;
        self.cells
            .entry(col)
            .or_insert_with(|| Cell::new(CellAddress::new(row, col)))
    }

    pub(crate) fn remove_cell(&mut self, col: u16) -> Option<Cell> {
        self.cells.remove(&col)
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.values_mut()
    }
}
