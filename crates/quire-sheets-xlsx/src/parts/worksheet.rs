//! `xl/worksheets/sheetN.xml`
//!
//! Decoding keeps cell payloads as raw text ([`CellRecord`]); turning them
//! into [`CellValue`]s needs the string and style tables and happens when the
//! reader assembles the model.

use quire_sheets_core::{Cell, CellValue, ColumnWidth, Sheet};

use super::shared_strings::{item_text, text_element};
use super::{flag, parsed, OFFICE_REL_NS, SPREADSHEETML_NS};
use crate::error::{XlsxError, XlsxResult};
use crate::xml::XmlElement;

/// A `<c>` element with its payload as written
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellRecord {
    /// `r` attribute (A1 reference)
    pub reference: Option<String>,
    /// `t` attribute
    pub cell_type: Option<String>,
    /// `s` attribute
    pub style: Option<u32>,
    /// Text of `<v>`
    pub value: Option<String>,
    /// Text of `<f>`
    pub formula: Option<String>,
    /// Text of `<is>`, runs concatenated and escapes decoded
    pub inline_text: Option<String>,
}

/// A `<row>` element
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowRecord {
    /// `r` attribute (1-based)
    pub number: Option<u32>,
    pub cells: Vec<CellRecord>,
}

/// Decoded worksheet part
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorksheetPart {
    /// `<dimension ref>`, informational only
    pub dimension: Option<String>,
    pub columns: Vec<ColumnWidth>,
    pub rows: Vec<RowRecord>,
    /// `<autoFilter ref>`
    pub auto_filter: Option<String>,
}

impl WorksheetPart {
    pub fn from_tree(part: &str, root: &XmlElement) -> XlsxResult<Self> {
        let sheet_data = root
            .child("sheetData")
            .ok_or_else(|| XlsxError::malformed(part, "worksheet has no <sheetData> element"))?;

        let mut worksheet = WorksheetPart {
            dimension: root
                .child("dimension")
                .and_then(|d| d.attr("ref"))
                .map(str::to_string),
            auto_filter: root
                .child("autoFilter")
                .and_then(|a| a.attr("ref"))
                .map(str::to_string),
            ..Default::default()
        };

        for cols in root.children_named("cols") {
            for col in cols.children_named("col") {
                if let Some(column) = read_column(part, col)? {
                    worksheet.columns.push(column);
                }
            }
        }

        for row in sheet_data.children_named("row") {
            let mut record = RowRecord {
                number: parsed(part, row, "r")?,
                cells: Vec::with_capacity(row.children.len()),
            };
            for c in row.children_named("c") {
                record.cells.push(read_cell(part, c)?);
            }
            worksheet.rows.push(record);
        }

        Ok(worksheet)
    }
}

fn read_column(part: &str, col: &XmlElement) -> XlsxResult<Option<ColumnWidth>> {
    let min = parsed::<u16>(part, col, "min")?;
    let max = parsed::<u16>(part, col, "max")?;
    let (Some(min), Some(max)) = (min, max) else {
        return Err(XlsxError::malformed(part, "<col> needs both 'min' and 'max'"));
    };
    // Columns without a width only carry formatting.
    let Some(width) = parsed::<f64>(part, col, "width")? else {
        return Ok(None);
    };
    let mut column = ColumnWidth::new(min, max, width)
        .map_err(|e| XlsxError::malformed(part, e.to_string()))?;
    column.custom_width = flag(part, col, "customWidth")?.unwrap_or(false);
    Ok(Some(column))
}

fn read_cell(part: &str, c: &XmlElement) -> XlsxResult<CellRecord> {
    Ok(CellRecord {
        reference: c.attr("r").map(str::to_string),
        cell_type: c.attr("t").map(str::to_string),
        style: parsed(part, c, "s")?,
        value: c.child("v").map(|v| v.text.clone()),
        formula: c.child("f").map(|f| f.text.clone()),
        inline_text: c.child("is").map(item_text),
    })
}

/// Build the worksheet tree for a sheet
pub fn to_tree(sheet: &Sheet) -> XmlElement {
    let dimension = sheet
        .used_range()
        .map(|r| r.to_a1_string())
        .unwrap_or_else(|| "A1".to_string());

    let mut root = XmlElement::new("worksheet")
        .with_attr("xmlns", SPREADSHEETML_NS)
        .with_attr("xmlns:r", OFFICE_REL_NS)
        .with_child(XmlElement::new("dimension").with_attr("ref", dimension));

    if !sheet.columns().is_empty() {
        let mut cols = XmlElement::new("cols");
        for column in sheet.columns() {
            let mut col = XmlElement::new("col")
                .with_attr("min", column.min)
                .with_attr("max", column.max)
                .with_attr("width", column.width);
            if column.custom_width {
                col.push_attr("customWidth", 1);
            }
            cols.push_child(col);
        }
        root.push_child(cols);
    }

    let mut sheet_data = XmlElement::new("sheetData");
    for row in sheet.rows() {
        let mut row_el = XmlElement::new("row").with_attr("r", row.number());
        for cell in row.cells() {
            row_el.push_child(cell_element(cell));
        }
        sheet_data.push_child(row_el);
    }
    root.push_child(sheet_data);

    if let Some(range) = sheet.auto_filter() {
        root.push_child(XmlElement::new("autoFilter").with_attr("ref", range.to_a1_string()));
    }
    root
}

fn cell_element(cell: &Cell) -> XmlElement {
    let mut c = XmlElement::new("c").with_attr("r", cell.address().to_a1_string());
    if let Some(style) = cell.style_index() {
        c.push_attr("s", style);
    }
    match cell.value() {
        CellValue::Empty => {}
        CellValue::SharedString(idx) => {
            c.push_attr("t", "s");
            c.push_child(XmlElement::new("v").with_text(idx.to_string()));
        }
        CellValue::Number(n) => {
            c.push_child(XmlElement::new("v").with_text(n.as_str()));
        }
        CellValue::Boolean(b) => {
            c.push_attr("t", "b");
            c.push_child(XmlElement::new("v").with_text(if *b { "1" } else { "0" }));
        }
        CellValue::InlineString(s) => {
            c.push_attr("t", "inlineStr");
            c.push_child(XmlElement::new("is").with_child(text_element(s)));
        }
        CellValue::Formula {
            text,
            result_type,
            cached,
        } => {
            if let Some(t) = result_type {
                c.push_attr("t", t);
            }
            c.push_child(XmlElement::new("f").with_text(text.as_str()));
            if let Some(v) = cached {
                c.push_child(XmlElement::new("v").with_text(v.as_str()));
            }
        }
    }
    c
}
