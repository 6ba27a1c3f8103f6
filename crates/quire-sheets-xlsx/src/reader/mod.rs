//! XLSX reader
//!
//! Reading runs in four steps driven by a [`ReadSession`]: load the archive,
//! parse the parts, assemble the model, hand the model out. Each step can be
//! called on its own; [`XlsxReader`] runs all of them.

use std::fs;
use std::io::Read;
use std::path::Path;

use log::{debug, warn};
use quire_sheets_core::{
    CellAddress, CellValue, NumberText, SharedStringTable, StyleTable, Workbook, MAX_ROWS,
};

use crate::archive::{read_entries, PackageEntries, CONTENT_TYPES};
use crate::error::{XlsxError, XlsxResult};
use crate::options::{ReadOptions, UnsupportedPolicy};
use crate::parts::content_types::ContentTypes;
use crate::parts::relationships::{rels_part_for, resolve_target, Relationships};
use crate::parts::workbook::WorkbookPart;
use crate::parts::worksheet::{CellRecord, WorksheetPart};
use crate::parts::{
    decode_excel_escapes, shared_strings, styles, REL_OFFICE_DOCUMENT, REL_SHARED_STRINGS,
    REL_STYLES, REL_WORKSHEET, ROOT_RELS_PART,
};
use crate::xml::{parse, PartSchema};

/// Progress of a [`ReadSession`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStage {
    Unopened,
    ArchiveLoaded,
    PartsParsed,
    ModelAssembled,
    /// Model handed out, or a step failed
    Closed,
}

impl ReadStage {
    pub fn as_str(self) -> &'static str {
        match self {
            ReadStage::Unopened => "unopened",
            ReadStage::ArchiveLoaded => "archive loaded",
            ReadStage::PartsParsed => "parts parsed",
            ReadStage::ModelAssembled => "model assembled",
            ReadStage::Closed => "closed",
        }
    }
}

/// A worksheet part with the workbook entry that points at it
#[derive(Debug)]
struct SheetSource {
    part: String,
    name: String,
    sheet_id: u32,
    worksheet: WorksheetPart,
}

/// Decoded parts, before references between them are resolved
#[derive(Debug)]
struct ParsedParts {
    workbook_part: String,
    sheets: Vec<SheetSource>,
    shared_strings: Option<(String, Vec<String>)>,
    styles: StyleTable,
}

/// Step-by-step reading of one package
///
/// A failed step closes the session and drops everything loaded so far;
/// calling a step out of order fails with [`XlsxError::InvalidState`].
///
/// ```no_run
/// use quire_sheets_xlsx::{ReadOptions, ReadSession, ReadStage};
///
/// let bytes = std::fs::read("report.xlsx").unwrap();
/// let mut session = ReadSession::new(ReadOptions::default());
/// session.load_archive(&bytes).unwrap();
/// session.parse_parts().unwrap();
/// session.assemble().unwrap();
/// let workbook = session.finish().unwrap();
/// assert_eq!(session.stage(), ReadStage::Closed);
/// # let _ = workbook;
/// ```
#[derive(Debug)]
pub struct ReadSession {
    options: ReadOptions,
    stage: ReadStage,
    entries: Option<PackageEntries>,
    parts: Option<ParsedParts>,
    workbook: Option<Workbook>,
}

impl ReadSession {
    pub fn new(options: ReadOptions) -> Self {
        Self {
            options,
            stage: ReadStage::Unopened,
            entries: None,
            parts: None,
            workbook: None,
        }
    }

    pub fn stage(&self) -> ReadStage {
        self.stage
    }

    /// Unpack the zip container
    pub fn load_archive(&mut self, bytes: &[u8]) -> XlsxResult<()> {
        self.expect(ReadStage::Unopened, "load archive")?;
        let entries = self.checked(read_entries(bytes))?;
        self.entries = Some(entries);
        self.advance(ReadStage::ArchiveLoaded);
        Ok(())
    }

    /// Decode content types, relationships and every part they lead to
    pub fn parse_parts(&mut self) -> XlsxResult<()> {
        self.expect(ReadStage::ArchiveLoaded, "parse parts")?;
        let entries = self.entries.take().unwrap_or_default();
        let parts = self.checked(parse_package(&entries))?;
        self.parts = Some(parts);
        self.advance(ReadStage::PartsParsed);
        Ok(())
    }

    /// Resolve references between parts and build the workbook
    pub fn assemble(&mut self) -> XlsxResult<()> {
        self.expect(ReadStage::PartsParsed, "assemble model")?;
        let Some(parts) = self.parts.take() else {
            return Err(self.invalid("assemble model"));
        };
        let workbook = self.checked(assemble_workbook(parts, self.options.unsupported))?;
        self.workbook = Some(workbook);
        self.advance(ReadStage::ModelAssembled);
        Ok(())
    }

    /// Hand out the assembled workbook and close the session
    pub fn finish(&mut self) -> XlsxResult<Workbook> {
        self.expect(ReadStage::ModelAssembled, "finish")?;
        let Some(workbook) = self.workbook.take() else {
            return Err(self.invalid("finish"));
        };
        self.advance(ReadStage::Closed);
        Ok(workbook)
    }

    fn expect(&self, stage: ReadStage, action: &'static str) -> XlsxResult<()> {
        if self.stage == stage {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> XlsxError {
        XlsxError::InvalidState {
            action,
            stage: self.stage.as_str(),
        }
    }

    fn advance(&mut self, stage: ReadStage) {
        debug!("read session: {} -> {}", self.stage.as_str(), stage.as_str());
        self.stage = stage;
    }

    /// Close the session if a step failed
    fn checked<T>(&mut self, result: XlsxResult<T>) -> XlsxResult<T> {
        if let Err(e) = &result {
            debug!("read session closed after error: {}", e);
            self.entries = None;
            self.parts = None;
            self.workbook = None;
            self.stage = ReadStage::Closed;
        }
        result
    }
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        Self::read_file_with(path, &ReadOptions::default())
    }

    pub fn read_file_with<P: AsRef<Path>>(path: P, options: &ReadOptions) -> XlsxResult<Workbook> {
        let bytes = fs::read(path)?;
        Self::read_bytes_with(&bytes, options)
    }

    /// Read a workbook from a reader
    pub fn read<R: Read>(reader: R) -> XlsxResult<Workbook> {
        Self::read_with(reader, &ReadOptions::default())
    }

    pub fn read_with<R: Read>(mut reader: R, options: &ReadOptions) -> XlsxResult<Workbook> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::read_bytes_with(&bytes, options)
    }

    /// Read a workbook from the bytes of a package
    pub fn read_bytes(bytes: &[u8]) -> XlsxResult<Workbook> {
        Self::read_bytes_with(bytes, &ReadOptions::default())
    }

    pub fn read_bytes_with(bytes: &[u8], options: &ReadOptions) -> XlsxResult<Workbook> {
        let mut session = ReadSession::new(options.clone());
        session.load_archive(bytes)?;
        session.parse_parts()?;
        session.assemble()?;
        session.finish()
    }
}

// === Parsing ===

fn required_entry<'a>(entries: &'a PackageEntries, part: &str) -> XlsxResult<&'a [u8]> {
    entries
        .get(part)
        .ok_or_else(|| XlsxError::malformed(part, "required part is missing"))
}

/// Entry a relationship points at; a dangling target is an inconsistent
/// reference
fn target_entry<'a>(
    entries: &'a PackageEntries,
    rels_part: &str,
    part: &str,
) -> XlsxResult<&'a [u8]> {
    entries.get(part).ok_or_else(|| {
        XlsxError::InconsistentReferences(format!(
            "{} points at missing part {}",
            rels_part, part
        ))
    })
}

fn parse_package(entries: &PackageEntries) -> XlsxResult<ParsedParts> {
    let content_types = ContentTypes::from_tree(
        CONTENT_TYPES,
        &parse(
            CONTENT_TYPES,
            required_entry(entries, CONTENT_TYPES)?,
            PartSchema::ContentTypes,
        )?,
    )?;

    let root_rels = Relationships::from_tree(
        ROOT_RELS_PART,
        &parse(
            ROOT_RELS_PART,
            required_entry(entries, ROOT_RELS_PART)?,
            PartSchema::Relationships,
        )?,
    )?;
    let office_document = root_rels
        .first_of_type(REL_OFFICE_DOCUMENT)
        .ok_or_else(|| {
            XlsxError::InconsistentReferences(format!(
                "{} has no officeDocument relationship",
                ROOT_RELS_PART
            ))
        })?;
    let workbook_part = resolve_target("", &office_document.target);

    let workbook = WorkbookPart::from_tree(
        &workbook_part,
        &parse(
            &workbook_part,
            required_entry(entries, &workbook_part)?,
            PartSchema::Workbook,
        )?,
    )?;

    let workbook_rels_part = rels_part_for(&workbook_part);
    let workbook_rels = Relationships::from_tree(
        &workbook_rels_part,
        &parse(
            &workbook_rels_part,
            required_entry(entries, &workbook_rels_part)?,
            PartSchema::Relationships,
        )?,
    )?;

    for rel in workbook_rels.iter() {
        if ![REL_WORKSHEET, REL_STYLES, REL_SHARED_STRINGS].contains(&rel.rel_type.as_str()) {
            warn!(
                "{}: skipping relationship {} of type {}",
                workbook_rels_part, rel.id, rel.rel_type
            );
        }
    }

    let mut sheets = Vec::with_capacity(workbook.sheets.len());
    for entry in workbook.sheets {
        let rel = workbook_rels.get(&entry.rel_id).ok_or_else(|| {
            XlsxError::InconsistentReferences(format!(
                "sheet '{}' refers to relationship {} missing from {}",
                entry.name, entry.rel_id, workbook_rels_part
            ))
        })?;
        if rel.rel_type != REL_WORKSHEET {
            return Err(XlsxError::unsupported(
                &workbook_part,
                format!("sheet '{}' of type {}", entry.name, rel.rel_type),
            ));
        }

        let part = resolve_target(&workbook_part, &rel.target);
        if content_types.content_type_of(&part).is_none() {
            warn!("{}: no content type declared", part);
        }
        let bytes = target_entry(entries, &workbook_rels_part, &part)?;
        debug!("parsing {} ({} bytes)", part, bytes.len());
        let worksheet =
            WorksheetPart::from_tree(&part, &parse(&part, bytes, PartSchema::Worksheet)?)?;
        sheets.push(SheetSource {
            part,
            name: entry.name,
            sheet_id: entry.sheet_id,
            worksheet,
        });
    }

    let styles = match workbook_rels.first_of_type(REL_STYLES) {
        Some(rel) => {
            let part = resolve_target(&workbook_part, &rel.target);
            let bytes = target_entry(entries, &workbook_rels_part, &part)?;
            styles::from_tree(&part, &parse(&part, bytes, PartSchema::Styles)?)?
        }
        None => {
            debug!("no styles part, using defaults");
            StyleTable::new()
        }
    };

    let shared_strings = match workbook_rels.first_of_type(REL_SHARED_STRINGS) {
        Some(rel) => {
            let part = resolve_target(&workbook_part, &rel.target);
            let bytes = target_entry(entries, &workbook_rels_part, &part)?;
            let strings =
                shared_strings::from_tree(&part, &parse(&part, bytes, PartSchema::SharedStrings)?)?;
            Some((part, strings))
        }
        None => None,
    };

    Ok(ParsedParts {
        workbook_part,
        sheets,
        shared_strings,
        styles,
    })
}

// === Assembly ===

fn assemble_workbook(parts: ParsedParts, policy: UnsupportedPolicy) -> XlsxResult<Workbook> {
    // File index -> table index; duplicates in the file collapse onto the
    // first occurrence.
    let mut table = SharedStringTable::new();
    let mut remap = Vec::new();
    if let Some((part, strings)) = &parts.shared_strings {
        remap.reserve(strings.len());
        for s in strings {
            remap.push(table.intern(s));
        }
        if table.len() != strings.len() {
            debug!(
                "{}: {} duplicate strings merged",
                part,
                strings.len() - table.len()
            );
        }
    }

    let style_count = parts.styles.len();
    let mut workbook = Workbook::from_tables(table, parts.styles);

    for source in parts.sheets {
        let index = workbook
            .add_sheet_with_id(&source.name, source.sheet_id)
            .map_err(|e| XlsxError::malformed(parts.workbook_part.as_str(), e.to_string()))?;
        let mut sheet = workbook.sheet_mut(index)?;
        let part = source.part.as_str();

        for column in source.worksheet.columns {
            sheet
                .add_column_width(column)
                .map_err(|e| XlsxError::malformed(part, e.to_string()))?;
        }

        let mut previous_row = 0u32;
        for row in source.worksheet.rows {
            let number = match row.number {
                Some(n) => n,
                None => previous_row + 1,
            };
            if number == 0 || number > MAX_ROWS {
                return Err(XlsxError::malformed(
                    part,
                    format!("row number {} out of bounds", number),
                ));
            }
            if sheet.sheet().row(number).is_some() {
                return Err(XlsxError::malformed(
                    part,
                    format!("row {} appears more than once", number),
                ));
            }
            sheet.put_row(number)?;
            previous_row = number;

            let mut previous_col: Option<u16> = None;
            for record in row.cells {
                let address = cell_address(part, &record, number, previous_col)?;
                previous_col = Some(address.col);

                let value = decode_value(part, &record, &address, &remap, policy)?;
                sheet.set_raw_value(address, value)?;

                if let Some(style) = record.style {
                    if style as usize >= style_count {
                        return Err(XlsxError::InconsistentReferences(format!(
                            "{}: cell {} uses style {} but cellXfs has {} entries",
                            part,
                            address.to_a1_string(),
                            style,
                            style_count
                        )));
                    }
                    sheet.set_cell_style_at(address.row, address.col, style)?;
                }
            }
        }

        if let Some(range) = &source.worksheet.auto_filter {
            sheet
                .set_auto_filter(range)
                .map_err(|e| XlsxError::malformed(part, e.to_string()))?;
        }

        debug!(
            "assembled sheet '{}' ({} cells)",
            sheet.sheet().name(),
            sheet.sheet().cell_count()
        );
    }

    Ok(workbook)
}

fn cell_address(
    part: &str,
    record: &CellRecord,
    row_number: u32,
    previous_col: Option<u16>,
) -> XlsxResult<CellAddress> {
    match &record.reference {
        Some(reference) => {
            let address = CellAddress::parse(reference)
                .map_err(|e| XlsxError::malformed(part, e.to_string()))?;
            if address.row_number() != row_number {
                return Err(XlsxError::malformed(
                    part,
                    format!("cell {} is inside row {}", reference, row_number),
                ));
            }
            Ok(address)
        }
        None => {
            let col = previous_col.map_or(0, |c| c + 1);
            let address = CellAddress::new(row_number - 1, col);
            warn!(
                "{}: cell without reference in row {}, placed at {}",
                part,
                row_number,
                address.to_a1_string()
            );
            Ok(address)
        }
    }
}

fn decode_value(
    part: &str,
    record: &CellRecord,
    address: &CellAddress,
    remap: &[u32],
    policy: UnsupportedPolicy,
) -> XlsxResult<CellValue> {
    let unsupported = |what: &str| {
        XlsxError::unsupported(part, format!("{} in cell {}", what, address.to_a1_string()))
    };
    let malformed = |reason: String| {
        XlsxError::malformed(part, format!("cell {}: {}", address.to_a1_string(), reason))
    };

    if let Some(formula) = &record.formula {
        return match policy {
            UnsupportedPolicy::Reject => Err(unsupported("formula")),
            UnsupportedPolicy::KeepOpaque => Ok(CellValue::Formula {
                text: formula.clone(),
                result_type: record.cell_type.clone(),
                cached: record.value.clone(),
            }),
        };
    }

    let value = record.value.as_deref();
    match record.cell_type.as_deref() {
        None | Some("n") => match value {
            None => Ok(CellValue::Empty),
            Some(v) => NumberText::parse(v)
                .map(CellValue::Number)
                .map_err(|_| malformed(format!("invalid number \"{}\"", v))),
        },
        Some("s") => {
            let Some(v) = value else {
                return Ok(CellValue::Empty);
            };
            let index: usize = v
                .trim()
                .parse()
                .map_err(|_| malformed(format!("invalid shared string index \"{}\"", v)))?;
            remap
                .get(index)
                .map(|&idx| CellValue::SharedString(idx))
                .ok_or_else(|| {
                    XlsxError::InconsistentReferences(format!(
                        "{}: cell {} refers to shared string {} but the table has {}",
                        part,
                        address.to_a1_string(),
                        index,
                        remap.len()
                    ))
                })
        }
        Some("b") => match value.map(str::trim) {
            None => Ok(CellValue::Empty),
            Some("1") | Some("true") => Ok(CellValue::Boolean(true)),
            Some("0") | Some("false") => Ok(CellValue::Boolean(false)),
            Some(v) => Err(malformed(format!("invalid boolean \"{}\"", v))),
        },
        Some("inlineStr") => Ok(CellValue::InlineString(match &record.inline_text {
            Some(text) => text.clone(),
            None => decode_excel_escapes(value.unwrap_or_default()),
        })),
        Some("str") => Ok(CellValue::InlineString(decode_excel_escapes(
            value.unwrap_or_default(),
        ))),
        Some(kind @ ("e" | "d")) => match policy {
            UnsupportedPolicy::Reject => Err(unsupported(if kind == "e" {
                "error value"
            } else {
                "date value"
            })),
            UnsupportedPolicy::KeepOpaque => {
                Ok(CellValue::InlineString(value.unwrap_or_default().to_string()))
            }
        },
        Some(other) => Err(malformed(format!("unknown cell type \"{}\"", other))),
    }
}
