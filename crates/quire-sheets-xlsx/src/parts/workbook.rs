//! `xl/workbook.xml`

use super::{parsed, required, OFFICE_REL_NS, SPREADSHEETML_NS};
use crate::error::{XlsxError, XlsxResult};
use crate::xml::XmlElement;

/// A `<sheet>` entry of the workbook part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetEntry {
    pub name: String,
    pub sheet_id: u32,
    /// Relationship id of the worksheet part
    pub rel_id: String,
}

/// Sheet list of the workbook part, in tab order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkbookPart {
    pub sheets: Vec<SheetEntry>,
}

impl WorkbookPart {
    pub fn to_tree(&self) -> XmlElement {
        let mut sheets = XmlElement::new("sheets");
        for entry in &self.sheets {
            sheets.push_child(
                XmlElement::new("sheet")
                    .with_attr("name", &entry.name)
                    .with_attr("sheetId", entry.sheet_id)
                    .with_attr("r:id", &entry.rel_id),
            );
        }
        XmlElement::new("workbook")
            .with_attr("xmlns", SPREADSHEETML_NS)
            .with_attr("xmlns:r", OFFICE_REL_NS)
            .with_child(sheets)
    }

    pub fn from_tree(part: &str, root: &XmlElement) -> XlsxResult<Self> {
        let sheets = root
            .child("sheets")
            .ok_or_else(|| XlsxError::malformed(part, "workbook has no <sheets> element"))?;

        let mut workbook = WorkbookPart::default();
        for sheet in sheets.children_named("sheet") {
            let sheet_id = parsed(part, sheet, "sheetId")?
                .ok_or_else(|| XlsxError::malformed(part, "<sheet> is missing attribute 'sheetId'"))?;
            if workbook.sheets.iter().any(|s| s.sheet_id == sheet_id) {
                return Err(XlsxError::malformed(
                    part,
                    format!("duplicate sheetId {}", sheet_id),
                ));
            }
            workbook.sheets.push(SheetEntry {
                name: required(part, sheet, "name")?.to_string(),
                sheet_id,
                rel_id: required(part, sheet, "id")?.to_string(),
            });
        }
        Ok(workbook)
    }
}
