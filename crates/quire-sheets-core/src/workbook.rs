//! Workbook type - the main document structure

use crate::cell::{Cell, CellValue};
use crate::error::{Error, Result};
use crate::shared_strings::SharedStringTable;
use crate::sheet::{Sheet, SheetEditor};
use crate::style::StyleTable;
use crate::MAX_SHEET_NAME_LEN;

/// A workbook (spreadsheet document)
///
/// Owns its sheets in tab order, the shared string table and the style
/// table. Two workbooks are equal when their sheets and the contents of
/// both tables are equal.
#[derive(Debug, Clone)]
pub struct Workbook {
    sheets: Vec<Sheet>,
    shared_strings: SharedStringTable,
    styles: StyleTable,
    next_sheet_id: u32,
}

impl Workbook {
    /// Create a workbook with no sheets and default tables
    pub fn new() -> Self {
        Self::from_tables(SharedStringTable::new(), StyleTable::new())
    }

    /// Create a workbook with no sheets around existing tables
    pub fn from_tables(shared_strings: SharedStringTable, styles: StyleTable) -> Self {
        Self {
            sheets: Vec::new(),
            shared_strings,
            styles,
            next_sheet_id: 1,
        }
    }

    /// Get the number of sheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Check if the workbook has no sheets
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Get a sheet by position
    pub fn sheet(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }

    /// Get a sheet by name (case-insensitive, like sheet name uniqueness)
    pub fn sheet_by_name(&self, name: &str) -> Option<&Sheet> {
        self.sheet_index(name).map(|i| &self.sheets[i])
    }

    /// Get the position of a sheet by name
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        let lower = name.to_lowercase();
        self.sheets
            .iter()
            .position(|s| s.name().to_lowercase() == lower)
    }

    /// Sheets in tab order
    pub fn sheets(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.iter()
    }

    /// Get an editor for the sheet at `index`
    pub fn sheet_mut(&mut self, index: usize) -> Result<SheetEditor<'_>> {
        let count = self.sheets.len();
        let sheet = self
            .sheets
            .get_mut(index)
            .ok_or(Error::SheetOutOfBounds(index, count))?;
        Ok(SheetEditor::new(
            sheet,
            &mut self.shared_strings,
            &self.styles,
        ))
    }

    /// Append a sheet, returning its position
    pub fn add_sheet(&mut self, name: &str) -> Result<usize> {
        let sheet_id = self.next_sheet_id;
        self.add_sheet_with_id(name, sheet_id)
    }

    /// Append a sheet with an explicit sheet id (as read from a file)
    ///
    /// Ids start at 1 and are distinct within the workbook.
    pub fn add_sheet_with_id(&mut self, name: &str, sheet_id: u32) -> Result<usize> {
        self.validate_sheet_name(name, None)?;
        if sheet_id == 0 {
            return Err(Error::InvalidSheetId(sheet_id));
        }
        if self.sheets.iter().any(|s| s.sheet_id() == sheet_id) {
            return Err(Error::DuplicateSheetId(sheet_id));
        }
        self.sheets.push(Sheet::new(name.to_string(), sheet_id));
        self.next_sheet_id = self.next_sheet_id.max(sheet_id.saturating_add(1));
        Ok(self.sheets.len() - 1)
    }

    /// Rename a sheet
    pub fn rename_sheet(&mut self, index: usize, new_name: &str) -> Result<()> {
        if index >= self.sheets.len() {
            return Err(Error::SheetOutOfBounds(index, self.sheets.len()));
        }
        self.validate_sheet_name(new_name, Some(index))?;
        self.sheets[index].set_name(new_name.to_string());
        Ok(())
    }

    /// Remove a sheet, returning it
    ///
    /// Strings and styles it referenced stay in the workbook tables.
    pub fn remove_sheet(&mut self, index: usize) -> Result<Sheet> {
        if index >= self.sheets.len() {
            return Err(Error::SheetOutOfBounds(index, self.sheets.len()));
        }
        Ok(self.sheets.remove(index))
    }

    /// The shared string table
    pub fn shared_strings(&self) -> &SharedStringTable {
        &self.shared_strings
    }

    /// The style table
    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    /// Mutable style table, for registering formats before assigning them
    pub fn styles_mut(&mut self) -> &mut StyleTable {
        &mut self.styles
    }

    /// Text of a cell as a user would see it, independent of its kind
    ///
    /// Shared strings are resolved, numbers use their canonical text,
    /// booleans read `TRUE`/`FALSE` and formulas show their cached result
    /// (or the formula text when nothing is cached).
    pub fn display_value(&self, cell: &Cell) -> Result<String> {
        let text = match cell.value() {
            CellValue::Empty => String::new(),
            CellValue::InlineString(s) => s.clone(),
            CellValue::SharedString(idx) => self.shared_strings.resolve(*idx)?.to_string(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Boolean(true) => "TRUE".to_string(),
            CellValue::Boolean(false) => "FALSE".to_string(),
            CellValue::Formula { text, cached, .. } => {
                cached.clone().unwrap_or_else(|| text.clone())
            }
        };
        Ok(text)
    }

    /// Move every inline string into the shared string table
    ///
    /// Returns the number of cells converted.
    pub fn share_inline_strings(&mut self) -> usize {
        let mut converted = 0;
        for sheet in &mut self.sheets {
            for cell in sheet.cells_mut() {
                if let CellValue::InlineString(s) = cell.value() {
                    let idx = self.shared_strings.intern(s);
                    cell.set_value(CellValue::SharedString(idx));
                    converted += 1;
                }
            }
        }
        converted
    }

    fn validate_sheet_name(&self, name: &str, exclude_index: Option<usize>) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
        if let Some(c) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name cannot contain '{}'",
                c
            )));
        }
        if let Some(c) = name.chars().find(|c| c.is_control()) {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name cannot contain control character U+{:04X}",
                c as u32
            )));
        }

        let name_lower = name.to_lowercase();
        for (i, sheet) in self.sheets.iter().enumerate() {
            if Some(i) != exclude_index && sheet.name().to_lowercase() == name_lower {
                return Err(Error::DuplicateSheetName(name.into()));
            }
        }

        Ok(())
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Workbook {
    fn eq(&self, other: &Self) -> bool {
        self.sheets == other.sheets
            && self.shared_strings == other.shared_strings
            && self.styles == other.styles
    }
}
