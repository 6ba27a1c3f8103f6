//! XLSX writer
//!
//! Writing renders every part into memory, packs the parts into a zip buffer
//! and only then touches the destination. A file destination is written
//! through a temporary file in the same directory that replaces the target
//! once complete.

use std::io::Write;
use std::path::Path;

use log::debug;
use quire_sheets_core::{CellValue, Workbook};
use tempfile::NamedTempFile;

use crate::archive::{write_entries, PackageEntries, CONTENT_TYPES};
use crate::error::{XlsxError, XlsxResult};
use crate::options::WriteOptions;
use crate::parts::content_types::ContentTypes;
use crate::parts::relationships::Relationships;
use crate::parts::workbook::{SheetEntry, WorkbookPart};
use crate::parts::{
    shared_strings, styles, worksheet, REL_OFFICE_DOCUMENT, REL_SHARED_STRINGS, REL_STYLES,
    REL_WORKSHEET, ROOT_RELS_PART, SHARED_STRINGS_PART, STYLES_PART, WORKBOOK_PART,
    WORKBOOK_RELS_PART,
};
use crate::xml::render;

/// Progress of a [`WriteSession`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStage {
    ModelProvided,
    PartsRendered,
    ArchiveBuilt,
    Persisted,
}

impl WriteStage {
    pub fn as_str(self) -> &'static str {
        match self {
            WriteStage::ModelProvided => "model provided",
            WriteStage::PartsRendered => "parts rendered",
            WriteStage::ArchiveBuilt => "archive built",
            WriteStage::Persisted => "persisted",
        }
    }
}

/// Step-by-step writing of one workbook
///
/// A failed step drops the buffers built so far and returns the session to
/// [`WriteStage::ModelProvided`]; the workbook is never modified.
#[derive(Debug)]
pub struct WriteSession<'a> {
    workbook: &'a Workbook,
    options: WriteOptions,
    stage: WriteStage,
    entries: Option<PackageEntries>,
    archive: Option<Vec<u8>>,
}

impl<'a> WriteSession<'a> {
    pub fn new(workbook: &'a Workbook, options: WriteOptions) -> Self {
        Self {
            workbook,
            options,
            stage: WriteStage::ModelProvided,
            entries: None,
            archive: None,
        }
    }

    pub fn stage(&self) -> WriteStage {
        self.stage
    }

    /// Render every part of the package
    pub fn render_parts(&mut self) -> XlsxResult<()> {
        self.expect(WriteStage::ModelProvided, "render parts")?;
        let entries = self.checked(render_package(self.workbook))?;
        self.entries = Some(entries);
        self.advance(WriteStage::PartsRendered);
        Ok(())
    }

    /// Pack the rendered parts into an in-memory archive
    pub fn build_archive(&mut self) -> XlsxResult<()> {
        self.expect(WriteStage::PartsRendered, "build archive")?;
        let entries = self.entries.take().unwrap_or_default();
        let archive = self.checked(write_entries(&entries, &self.options))?;
        self.archive = Some(archive);
        self.advance(WriteStage::ArchiveBuilt);
        Ok(())
    }

    /// The built archive, once [`build_archive`](Self::build_archive) succeeded
    pub fn archive(&self) -> Option<&[u8]> {
        self.archive.as_deref()
    }

    /// Take the built archive
    pub fn into_bytes(mut self) -> XlsxResult<Vec<u8>> {
        self.expect(WriteStage::ArchiveBuilt, "take archive")?;
        self.archive
            .take()
            .ok_or_else(|| self.invalid("take archive"))
    }

    /// Copy the archive to a writer
    pub fn persist_to<W: Write>(&mut self, mut writer: W) -> XlsxResult<()> {
        self.expect(WriteStage::ArchiveBuilt, "persist")?;
        let archive = self.archive.as_deref().unwrap_or_default();
        let result = writer
            .write_all(archive)
            .and_then(|_| writer.flush())
            .map_err(XlsxError::from);
        self.checked(result)?;
        self.advance(WriteStage::Persisted);
        Ok(())
    }

    /// Write the archive to `path`, replacing any existing file
    ///
    /// The bytes go to a temporary file next to `path` first; the target is
    /// only replaced once the temporary file is complete.
    pub fn persist_file<P: AsRef<Path>>(&mut self, path: P) -> XlsxResult<()> {
        self.expect(WriteStage::ArchiveBuilt, "persist")?;
        let archive = self.archive.as_deref().unwrap_or_default();
        let result = persist_atomically(archive, path.as_ref());
        self.checked(result)?;
        self.advance(WriteStage::Persisted);
        Ok(())
    }

    fn expect(&self, stage: WriteStage, action: &'static str) -> XlsxResult<()> {
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

    fn advance(&mut self, stage: WriteStage) {
        debug!("write session: {} -> {}", self.stage.as_str(), stage.as_str());
        self.stage = stage;
    }

    /// Reset the session if a step failed
    fn checked<T>(&mut self, result: XlsxResult<T>) -> XlsxResult<T> {
        if let Err(e) = &result {
            debug!("write session reset after error: {}", e);
            self.entries = None;
            self.archive = None;
            self.stage = WriteStage::ModelProvided;
        }
        result
    }
}

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a workbook to a file path
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsxResult<()> {
        Self::write_file_with(workbook, path, &WriteOptions::default())
    }

    pub fn write_file_with<P: AsRef<Path>>(
        workbook: &Workbook,
        path: P,
        options: &WriteOptions,
    ) -> XlsxResult<()> {
        let mut session = Self::built(workbook, options)?;
        session.persist_file(path)
    }

    /// Write a workbook to a writer
    pub fn write<W: Write>(workbook: &Workbook, writer: W) -> XlsxResult<()> {
        Self::write_with(workbook, writer, &WriteOptions::default())
    }

    pub fn write_with<W: Write>(
        workbook: &Workbook,
        writer: W,
        options: &WriteOptions,
    ) -> XlsxResult<()> {
        let mut session = Self::built(workbook, options)?;
        session.persist_to(writer)
    }

    /// Write a workbook into a new byte buffer
    pub fn write_bytes(workbook: &Workbook) -> XlsxResult<Vec<u8>> {
        Self::write_bytes_with(workbook, &WriteOptions::default())
    }

    pub fn write_bytes_with(workbook: &Workbook, options: &WriteOptions) -> XlsxResult<Vec<u8>> {
        Self::built(workbook, options)?.into_bytes()
    }

    fn built<'a>(workbook: &'a Workbook, options: &WriteOptions) -> XlsxResult<WriteSession<'a>> {
        let mut session = WriteSession::new(workbook, options.clone());
        session.render_parts()?;
        session.build_archive()?;
        Ok(session)
    }
}

fn persist_atomically(bytes: &[u8], path: &Path) -> XlsxResult<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| XlsxError::Io(e.error))?;
    debug!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

/// Check that there is at least one sheet and that every cell reference
/// resolves, before anything is rendered
fn check_references(workbook: &Workbook) -> XlsxResult<()> {
    if workbook.is_empty() {
        return Err(XlsxError::InconsistentReferences(
            "workbook has no sheets; a package needs at least one".to_string(),
        ));
    }
    let strings = workbook.shared_strings().len();
    let styles = workbook.styles().len();
    for sheet in workbook.sheets() {
        for cell in sheet.cells() {
            if let CellValue::SharedString(idx) = cell.value() {
                if *idx as usize >= strings {
                    return Err(XlsxError::InconsistentReferences(format!(
                        "sheet '{}' cell {} refers to shared string {} but the table has {}",
                        sheet.name(),
                        cell.address().to_a1_string(),
                        idx,
                        strings
                    )));
                }
            }
            if let Some(style) = cell.style_index() {
                if style as usize >= styles {
                    return Err(XlsxError::InconsistentReferences(format!(
                        "sheet '{}' cell {} uses style {} but the table has {}",
                        sheet.name(),
                        cell.address().to_a1_string(),
                        style,
                        styles
                    )));
                }
            }
        }
    }
    Ok(())
}

fn render_package(workbook: &Workbook) -> XlsxResult<PackageEntries> {
    check_references(workbook)?;

    let sheet_count = workbook.sheet_count();
    let mut entries = PackageEntries::new();

    entries.insert(
        CONTENT_TYPES,
        render(&ContentTypes::for_workbook(sheet_count).to_tree()),
    );

    let mut root_rels = Relationships::new();
    root_rels.push("rId1", REL_OFFICE_DOCUMENT, WORKBOOK_PART);
    entries.insert(ROOT_RELS_PART, render(&root_rels.to_tree()));

    let mut workbook_part = WorkbookPart::default();
    let mut workbook_rels = Relationships::new();
    let mut string_references = 0usize;

    for (i, sheet) in workbook.sheets().enumerate() {
        let number = i + 1;
        let rel_id = format!("rId{}", number);
        workbook_rels.push(
            rel_id.clone(),
            REL_WORKSHEET,
            format!("worksheets/sheet{}.xml", number),
        );
        workbook_part.sheets.push(SheetEntry {
            name: sheet.name().to_string(),
            sheet_id: sheet.sheet_id(),
            rel_id,
        });

        string_references += sheet
            .cells()
            .filter(|c| matches!(c.value(), CellValue::SharedString(_)))
            .count();

        let part = format!("xl/worksheets/sheet{}.xml", number);
        let xml = render(&worksheet::to_tree(sheet));
        debug!("rendered {} ({} bytes)", part, xml.len());
        entries.insert(part, xml);
    }

    workbook_rels.push(format!("rId{}", sheet_count + 1), REL_STYLES, "styles.xml");
    workbook_rels.push(
        format!("rId{}", sheet_count + 2),
        REL_SHARED_STRINGS,
        "sharedStrings.xml",
    );

    entries.insert(WORKBOOK_PART, render(&workbook_part.to_tree()));
    entries.insert(WORKBOOK_RELS_PART, render(&workbook_rels.to_tree()));
    entries.insert(STYLES_PART, render(&styles::to_tree(workbook.styles())));
    entries.insert(
        SHARED_STRINGS_PART,
        render(&shared_strings::to_tree(
            workbook.shared_strings(),
            string_references,
        )),
    );

    debug!("rendered {} parts", entries.len());
    Ok(entries)
}
