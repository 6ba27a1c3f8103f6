//! Workbook style table with per-component deduplication

use ahash::AHashMap;
use std::hash::Hash;

use super::number_format::{builtin_format_code, FIRST_CUSTOM_NUM_FMT_ID};
use super::{BorderStyle, FillStyle, FontStyle, NumberFormat, Style};
use crate::error::{out_of_range, Error, Result};

/// A cell format record (`<xf>` in `cellXfs`)
///
/// Cells reference these by position; the components reference the font,
/// fill and border tables by position and the numbering formats by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellFormat {
    pub font_id: u32,
    pub fill_id: u32,
    pub border_id: u32,
    pub num_fmt_id: u32,
    pub apply_font: bool,
    pub apply_fill: bool,
    pub apply_border: bool,
    pub apply_number_format: bool,
}

impl CellFormat {
    /// Record for the given components, with apply flags set for every
    /// non-default component
    pub fn new(font_id: u32, fill_id: u32, border_id: u32, num_fmt_id: u32) -> Self {
        Self {
            font_id,
            fill_id,
            border_id,
            num_fmt_id,
            apply_font: font_id != 0,
            apply_fill: fill_id != 0,
            apply_border: border_id != 0,
            apply_number_format: num_fmt_id != 0,
        }
    }

    fn key(&self) -> (u32, u32, u32, u32) {
        (self.font_id, self.fill_id, self.border_id, self.num_fmt_id)
    }
}

/// An append-only list with a reverse lookup map
///
/// The map keeps the first index of each value, so tables loaded from a file
/// that already contain duplicates keep their positions.
#[derive(Debug, Clone)]
struct InternList<T: Eq + Hash + Clone> {
    items: Vec<T>,
    index: AHashMap<T, u32>,
}

impl<T: Eq + Hash + Clone> InternList<T> {
    fn from_items(items: Vec<T>) -> Self {
        let mut index = AHashMap::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            index.entry(item.clone()).or_insert(i as u32);
        }
        Self { items, index }
    }

    fn intern(&mut self, item: T) -> u32 {
        if let Some(&idx) = self.index.get(&item) {
            return idx;
        }
        let idx = self.items.len() as u32;
        self.index.insert(item.clone(), idx);
        self.items.push(item);
        idx
    }

    fn get(&self, idx: u32) -> Option<&T> {
        self.items.get(idx as usize)
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

/// Fonts, fills, borders, numbering formats and cell format records
///
/// Index 0 of every table is the default: Calibri 11, no fill, no border
/// and the General cell format. Fill 1 is always the `gray125` pattern.
/// Custom numbering format ids are handed out from 164 upwards.
/// Interned fonts must have a positive finite size and interned borders are
/// stored without `None`-style edges.
#[derive(Debug, Clone)]
pub struct StyleTable {
    fonts: InternList<FontStyle>,
    fills: InternList<FillStyle>,
    borders: InternList<BorderStyle>,
    num_fmts: Vec<(u32, String)>,
    num_fmt_ids: AHashMap<String, u32>,
    next_num_fmt_id: u64,
    cell_formats: Vec<CellFormat>,
    cell_format_index: AHashMap<(u32, u32, u32, u32), u32>,
}

impl StyleTable {
    /// Create a table holding only the mandatory defaults
    pub fn new() -> Self {
        Self {
            fonts: InternList::from_items(vec![FontStyle::default()]),
            fills: InternList::from_items(vec![FillStyle::None, FillStyle::gray125()]),
            borders: InternList::from_items(vec![BorderStyle::default()]),
            num_fmts: Vec::new(),
            num_fmt_ids: AHashMap::new(),
            next_num_fmt_id: u64::from(FIRST_CUSTOM_NUM_FMT_ID),
            cell_formats: vec![CellFormat::default()],
            cell_format_index: AHashMap::from_iter([(CellFormat::default().key(), 0)]),
        }
    }

    /// Build a table from decoded records, keeping every position
    ///
    /// Empty tables receive their defaults. Component ids of every cell
    /// format are checked against the loaded tables.
    pub fn from_parts(
        mut fonts: Vec<FontStyle>,
        mut fills: Vec<FillStyle>,
        mut borders: Vec<BorderStyle>,
        num_fmts: Vec<(u32, String)>,
        mut cell_formats: Vec<CellFormat>,
    ) -> Result<Self> {
        if fonts.is_empty() {
            fonts.push(FontStyle::default());
        }
        if fills.is_empty() {
            fills = vec![FillStyle::None, FillStyle::gray125()];
        }
        if borders.is_empty() {
            borders.push(BorderStyle::default());
        }
        if cell_formats.is_empty() {
            cell_formats.push(CellFormat::default());
        }

        let mut table = Self {
            fonts: InternList::from_items(fonts),
            fills: InternList::from_items(fills),
            borders: InternList::from_items(borders),
            num_fmts: Vec::with_capacity(num_fmts.len()),
            num_fmt_ids: AHashMap::with_capacity(num_fmts.len()),
            next_num_fmt_id: u64::from(FIRST_CUSTOM_NUM_FMT_ID),
            cell_formats: Vec::with_capacity(cell_formats.len()),
            cell_format_index: AHashMap::with_capacity(cell_formats.len()),
        };

        for (id, code) in num_fmts {
            table.num_fmt_ids.entry(code.clone()).or_insert(id);
            table.next_num_fmt_id = table.next_num_fmt_id.max(u64::from(id) + 1);
            table.num_fmts.push((id, code));
        }

        for format in cell_formats {
            table.check_components(&format)?;
            let idx = table.cell_formats.len() as u32;
            table.cell_format_index.entry(format.key()).or_insert(idx);
            table.cell_formats.push(format);
        }

        Ok(table)
    }

    /// Intern a font, returning its index
    ///
    /// Fails with `InvalidFontSize` unless the size is a positive finite
    /// number of points.
    pub fn intern_font(&mut self, font: FontStyle) -> Result<u32> {
        if !(font.size.is_finite() && font.size > 0.0) {
            return Err(Error::InvalidFontSize(font.size));
        }
        Ok(self.fonts.intern(font))
    }

    /// Intern a fill, returning its index
    pub fn intern_fill(&mut self, fill: FillStyle) -> u32 {
        self.fills.intern(fill)
    }

    /// Intern a border, returning its index
    pub fn intern_border(&mut self, border: BorderStyle) -> u32 {
        self.borders.intern(border.normalized())
    }

    /// Register a custom numbering format code, returning its id
    ///
    /// An identical code reuses its id; new codes get the next id from 164.
    pub fn intern_numbering_format(&mut self, code: &str) -> Result<u32> {
        if let Some(&id) = self.num_fmt_ids.get(code) {
            return Ok(id);
        }
        let id = u32::try_from(self.next_num_fmt_id)
            .map_err(|_| Error::NumberFormatIdsExhausted(u32::MAX))?;
        self.next_num_fmt_id += 1;
        self.num_fmt_ids.insert(code.to_string(), id);
        self.num_fmts.push((id, code.to_string()));
        Ok(id)
    }

    /// Intern a cell format record for the given components
    ///
    /// Fails with `IndexOutOfRange` when a component id is unknown.
    ///
    /// # Examples
    /// ```
    /// use quire_sheets_core::StyleTable;
    ///
    /// let mut styles = StyleTable::new();
    /// let fmt = styles.intern_numbering_format("#,##0.00").unwrap();
    /// let a = styles.intern_cell_format(0, 0, 0, fmt).unwrap();
    /// let b = styles.intern_cell_format(0, 0, 0, fmt).unwrap();
    /// assert_eq!(a, b);
    /// assert!(styles.intern_cell_format(7, 0, 0, 0).is_err());
    /// ```
    pub fn intern_cell_format(
        &mut self,
        font_id: u32,
        fill_id: u32,
        border_id: u32,
        num_fmt_id: u32,
    ) -> Result<u32> {
        let format = CellFormat::new(font_id, fill_id, border_id, num_fmt_id);
        self.check_components(&format)?;

        if let Some(&idx) = self.cell_format_index.get(&format.key()) {
            return Ok(idx);
        }
        let idx = self.cell_formats.len() as u32;
        self.cell_format_index.insert(format.key(), idx);
        self.cell_formats.push(format);
        Ok(idx)
    }

    /// Intern every component of a style, then its cell format record
    pub fn intern_style(&mut self, style: &Style) -> Result<u32> {
        let font_id = self.intern_font(style.font.clone())?;
        let fill_id = self.intern_fill(style.fill.clone());
        let border_id = self.intern_border(style.border.clone());
        let num_fmt_id = match &style.number_format {
            NumberFormat::General => 0,
            NumberFormat::BuiltIn(id) => *id,
            NumberFormat::Custom(code) => self.intern_numbering_format(code)?,
        };
        self.intern_cell_format(font_id, fill_id, border_id, num_fmt_id)
    }

    /// Rebuild the high-level style of a cell format record
    pub fn style(&self, index: u32) -> Result<Style> {
        let format = self.cell_format(index)?;
        let number_format = match format.num_fmt_id {
            0 => NumberFormat::General,
            id if id < FIRST_CUSTOM_NUM_FMT_ID => NumberFormat::BuiltIn(id),
            id => NumberFormat::Custom(
                self.numbering_format_code(id)
                    .ok_or_else(|| out_of_range("numFmts", id, self.num_fmts.len()))?
                    .to_string(),
            ),
        };
        Ok(Style {
            font: self.font(format.font_id)?.clone(),
            fill: self.fill(format.fill_id)?.clone(),
            border: self.border(format.border_id)?.clone(),
            number_format,
        })
    }

    pub fn font(&self, index: u32) -> Result<&FontStyle> {
        self.fonts
            .get(index)
            .ok_or_else(|| out_of_range("fonts", index, self.fonts.len()))
    }

    pub fn fill(&self, index: u32) -> Result<&FillStyle> {
        self.fills
            .get(index)
            .ok_or_else(|| out_of_range("fills", index, self.fills.len()))
    }

    pub fn border(&self, index: u32) -> Result<&BorderStyle> {
        self.borders
            .get(index)
            .ok_or_else(|| out_of_range("borders", index, self.borders.len()))
    }

    pub fn cell_format(&self, index: u32) -> Result<&CellFormat> {
        self.cell_formats
            .get(index as usize)
            .ok_or_else(|| out_of_range("cellXfs", index, self.cell_formats.len()))
    }

    /// Format code for a numbering format id (custom or built-in)
    pub fn numbering_format_code(&self, id: u32) -> Option<&str> {
        self.num_fmts
            .iter()
            .find(|(fmt_id, _)| *fmt_id == id)
            .map(|(_, code)| code.as_str())
            .or_else(|| builtin_format_code(id))
    }

    pub fn fonts(&self) -> &[FontStyle] {
        &self.fonts.items
    }

    pub fn fills(&self) -> &[FillStyle] {
        &self.fills.items
    }

    pub fn borders(&self) -> &[BorderStyle] {
        &self.borders.items
    }

    /// Custom numbering formats as `(id, code)` in registration order
    pub fn numbering_formats(&self) -> &[(u32, String)] {
        &self.num_fmts
    }

    pub fn cell_formats(&self) -> &[CellFormat] {
        &self.cell_formats
    }

    /// Number of cell format records (valid style indices are below this)
    pub fn len(&self) -> usize {
        self.cell_formats.len()
    }

    /// Check if only the default cell format exists
    pub fn is_empty(&self) -> bool {
        self.cell_formats.len() <= 1
    }

    fn check_components(&self, format: &CellFormat) -> Result<()> {
        self.font(format.font_id)?;
        self.fill(format.fill_id)?;
        self.border(format.border_id)?;
        if format.num_fmt_id >= FIRST_CUSTOM_NUM_FMT_ID
            && !self.num_fmts.iter().any(|(id, _)| *id == format.num_fmt_id)
        {
            return Err(out_of_range(
                "numFmts",
                format.num_fmt_id,
                self.num_fmts.len(),
            ));
        }
        Ok(())
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for StyleTable {
    fn eq(&self, other: &Self) -> bool {
        self.fonts.items == other.fonts.items
            && self.fills.items == other.fills.items
            && self.borders.items == other.borders.items
            && self.num_fmts == other.num_fmts
            && self.cell_formats == other.cell_formats
    }
}
