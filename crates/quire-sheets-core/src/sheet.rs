//! Sheet type and its editor

use std::collections::BTreeMap;

use crate::cell::{Cell, CellAddress, CellInput, CellRange, CellValue};
use crate::column::ColumnWidth;
use crate::error::{Error, Result};
use crate::row::Row;
use crate::shared_strings::SharedStringTable;
use crate::style::StyleTable;
use crate::{MAX_COLS, MAX_ROWS};

/// A sheet within a workbook
///
/// Sheets are read through this type and changed through a [`SheetEditor`]
/// obtained from [`Workbook::sheet_mut`](crate::Workbook::sheet_mut), which
/// also has access to the workbook's string and style tables.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sheet {
    name: String,
    sheet_id: u32,
    /// Rows keyed by 1-based row number
    rows: BTreeMap<u32, Row>,
    /// Width overrides, sorted by `min`, never overlapping
    columns: Vec<ColumnWidth>,
    auto_filter: Option<CellRange>,
}

impl Sheet {
    pub(crate) fn new(name: String, sheet_id: u32) -> Self {
        Self {
            name,
            sheet_id,
            rows: BTreeMap::new(),
            columns: Vec::new(),
            auto_filter: None,
        }
    }

    /// Sheet name (tab label)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Stable sheet id, independent of the sheet's position
    pub fn sheet_id(&self) -> u32 {
        self.sheet_id
    }

    /// Rows in ascending row order
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.values()
    }

    /// Get a row by 1-based row number
    pub fn row(&self, number: u32) -> Option<&Row> {
        self.rows.get(&number)
    }

    /// Number of rows present (including rows without cells)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// All cells in document order (row by row, then by column)
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.values().flat_map(|row| row.cells())
    }

    /// Number of cells on the sheet
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(Row::cell_count).sum()
    }

    /// Get a cell by A1-style address
    pub fn cell(&self, address: &str) -> Result<Option<&Cell>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cell_at(addr.row, addr.col))
    }

    /// Get a cell by 0-based row and column
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&Cell> {
        self.rows.get(&(row + 1)).and_then(|r| r.cell(col))
    }

    /// Get a cell's value, treating a missing cell as empty
    pub fn value(&self, address: &str) -> Result<CellValue> {
        Ok(self
            .cell(address)?
            .map(|cell| cell.value().clone())
            .unwrap_or_default())
    }

    /// Column width overrides, ordered by first column
    pub fn columns(&self) -> &[ColumnWidth] {
        &self.columns
    }

    /// Width override covering a 1-based column
    pub fn column_width(&self, column: u16) -> Option<&ColumnWidth> {
        self.columns.iter().find(|c| c.covers(column))
    }

    /// Auto-filter range, if one is set
    pub fn auto_filter(&self) -> Option<&CellRange> {
        self.auto_filter.as_ref()
    }

    /// Smallest range covering every cell, or None for a sheet without cells
    pub fn used_range(&self) -> Option<CellRange> {
        let mut cells = self.cells();
        let first = cells.next()?;
        let mut range = CellRange::single(first.address());
        for cell in cells {
            range.extend_to(cell.address());
        }
        Some(range)
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.rows.values_mut().flat_map(|row| row.cells_mut())
    }
}

/// Mutable access to one sheet together with the workbook tables
///
/// String values are interned into the shared string table and style
/// indices are checked against the style table, so the sheet never holds a
/// reference the workbook cannot resolve.
#[derive(Debug)]
pub struct SheetEditor<'a> {
    sheet: &'a mut Sheet,
    strings: &'a mut SharedStringTable,
    styles: &'a StyleTable,
}

impl<'a> SheetEditor<'a> {
    pub(crate) fn new(
        sheet: &'a mut Sheet,
        strings: &'a mut SharedStringTable,
        styles: &'a StyleTable,
    ) -> Self {
        Self {
            sheet,
            strings,
            styles,
        }
    }

    /// The sheet being edited
    pub fn sheet(&self) -> &Sheet {
        self.sheet
    }

    /// Set a cell value by A1-style address
    ///
    /// # Examples
    /// ```
    /// use quire_sheets_core::Workbook;
    ///
    /// let mut workbook = Workbook::new();
    /// let idx = workbook.add_sheet("Data").unwrap();
    /// let mut sheet = workbook.sheet_mut(idx).unwrap();
    /// sheet.set_cell_value("A1", "Hello").unwrap();
    /// sheet.set_cell_value("B1", 42.0).unwrap();
    /// ```
    pub fn set_cell_value<V: Into<CellInput>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by 0-based row and column
    pub fn set_cell_value_at<V: Into<CellInput>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        check_bounds(row, col)?;
        let value = match value.into() {
            CellInput::Empty => CellValue::Empty,
            CellInput::Text(s) => CellValue::SharedString(self.strings.intern(&s)),
            CellInput::Number(n) => CellValue::number(n)?,
            CellInput::Boolean(b) => CellValue::Boolean(b),
        };
        self.store(row, col, value)
    }

    /// Store an already decoded value
    ///
    /// Shared-string indices are checked against the string table.
    pub fn set_raw_value(&mut self, address: CellAddress, value: CellValue) -> Result<()> {
        if let CellValue::SharedString(idx) = value {
            self.strings.resolve(idx)?;
        }
        self.store(address.row, address.col, value)
    }

    /// Set a cell's style index by A1-style address
    pub fn set_cell_style(&mut self, address: &str, style_index: u32) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_style_at(addr.row, addr.col, style_index)
    }

    /// Set a cell's style index by 0-based row and column
    ///
    /// The cell is created empty if it does not exist yet.
    pub fn set_cell_style_at(&mut self, row: u32, col: u16, style_index: u32) -> Result<()> {
        check_bounds(row, col)?;
        self.styles.cell_format(style_index)?;
        self.row_entry(row)
            .cell_entry(col)
            .set_style_index(Some(style_index));
        Ok(())
    }

    /// Remove a cell, keeping its row
    pub fn clear_cell(&mut self, address: &str) -> Result<Option<Cell>> {
        let addr = CellAddress::parse(address)?;
        Ok(self
            .sheet
            .rows
            .get_mut(&addr.row_number())
            .and_then(|row| row.remove_cell(addr.col)))
    }

    /// Add a row, replacing any existing row with the same number by an empty one
    pub fn put_row(&mut self, number: u32) -> Result<()> {
        if number == 0 || number > MAX_ROWS {
            return Err(Error::RowOutOfBounds(number, MAX_ROWS));
        }
        self.sheet.rows.insert(number, Row::new(number));
        Ok(())
    }

    /// Set a custom width for the 1-based columns `min..=max`
    pub fn set_column_width(&mut self, min: u16, max: u16, width: f64) -> Result<()> {
        self.add_column_width(ColumnWidth::new(min, max, width)?)
    }

    /// Add a width override, rejecting ranges that overlap an existing one
    pub fn add_column_width(&mut self, column: ColumnWidth) -> Result<()> {
        if column.min == 0 || column.min > column.max || column.max > MAX_COLS {
            return Err(Error::InvalidColumnRange {
                min: column.min,
                max: column.max,
            });
        }
        if self.sheet.columns.iter().any(|c| c.overlaps(&column)) {
            return Err(Error::OverlappingColumns {
                min: column.min,
                max: column.max,
            });
        }
        let pos = self
            .sheet
            .columns
            .partition_point(|c| c.min < column.min);
        self.sheet.columns.insert(pos, column);
        Ok(())
    }

    /// Set the auto-filter range (e.g. "B1" or "A1:F2")
    pub fn set_auto_filter(&mut self, range: &str) -> Result<()> {
        self.sheet.auto_filter = Some(CellRange::parse(range)?);
        Ok(())
    }

    /// Remove the auto-filter
    pub fn clear_auto_filter(&mut self) {
        self.sheet.auto_filter = None;
    }

    fn store(&mut self, row: u32, col: u16, value: CellValue) -> Result<()> {
        check_bounds(row, col)?;
        self.row_entry(row).cell_entry(col).set_value(value);
        Ok(())
    }

    fn row_entry(&mut self, row: u32) -> &mut Row {
        let number = row + 1;
        self.sheet
            .rows
            .entry(number)
            .or_insert_with(|| Row::new(number))
    }
}

fn check_bounds(row: u32, col: u16) -> Result<()> {
    if row >= MAX_ROWS {
        return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
    }
    if col >= MAX_COLS {
        return Err(Error::ColumnOutOfBounds(col as u32, MAX_COLS - 1));
    }
    Ok(())
}
