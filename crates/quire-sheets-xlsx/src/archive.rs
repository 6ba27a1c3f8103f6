//! Zip container access
//!
//! The package is handled as a flat map of entry name to bytes. Reading
//! verifies every entry; writing emits entries in a fixed order with a fixed
//! timestamp, so an unchanged set of entries always produces the same bytes.

use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};

use log::{debug, trace};
use zip::write::SimpleFileOptions;
use zip::{DateTime, ZipArchive, ZipWriter};

use crate::error::{XlsxError, XlsxResult};
use crate::options::WriteOptions;

/// Name of the content types entry, always first in the archive
pub const CONTENT_TYPES: &str = "[Content_Types].xml";

/// Named entries of a package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageEntries {
    entries: BTreeMap<String, Vec<u8>>,
}

impl PackageEntries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry
    pub fn insert(&mut self, name: impl Into<String>, data: Vec<u8>) {
        self.entries.insert(name.into(), data);
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<u8>> {
        self.entries.remove(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry names in archive order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_by(|a, b| entry_rank(a).cmp(&entry_rank(b)));
        names
    }
}

/// Sort key giving content types first, then relationship parts (root
/// first), then everything else by name
fn entry_rank(name: &str) -> (u8, u8, &str) {
    if name == CONTENT_TYPES {
        (0, 0, name)
    } else if name == "_rels/.rels" {
        (1, 0, name)
    } else if name.starts_with("_rels/") {
        (1, 1, name)
    } else {
        (2, 0, name)
    }
}

fn corrupt(reason: impl std::fmt::Display) -> XlsxError {
    XlsxError::CorruptArchive(reason.to_string())
}

/// Extract every entry of a zip container
///
/// Fails with `CorruptArchive` when the container cannot be parsed, an
/// entry fails its CRC check, or an entry's length differs from its header.
pub fn read_entries(bytes: &[u8]) -> XlsxResult<PackageEntries> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(corrupt)?;
    let mut entries = PackageEntries::new();

    for i in 0..archive.len() {
        let mut file = archive.by_index(i).map_err(corrupt)?;
        if file.is_dir() {
            continue;
        }

        let name = file.name().to_string();
        let declared = file.size();
        let mut data = Vec::with_capacity(declared.min(64 * 1024 * 1024) as usize);
        file.read_to_end(&mut data)
            .map_err(|e| corrupt(format!("{}: {}", name, e)))?;

        if data.len() as u64 != declared {
            return Err(corrupt(format!(
                "{}: expected {} bytes, found {}",
                name,
                declared,
                data.len()
            )));
        }
        if entries.contains(&name) {
            return Err(corrupt(format!("duplicate entry {}", name)));
        }

        trace!("read entry {} ({} bytes)", name, data.len());
        entries.insert(name, data);
    }

    debug!("read {} archive entries", entries.len());
    Ok(entries)
}

/// Pack entries into an in-memory zip container
pub fn write_entries(entries: &PackageEntries, options: &WriteOptions) -> XlsxResult<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let file_options = || {
        SimpleFileOptions::default()
            .compression_method(options.compression.method())
            .last_modified_time(DateTime::default())
    };

    for name in entries.names() {
        let data = entries.get(name).unwrap_or_default();
        trace!("write entry {} ({} bytes)", name, data.len());
        zip.start_file(name, file_options())?;
        zip.write_all(data)?;
    }

    let bytes = zip.finish()?.into_inner();
    debug!(
        "built archive of {} entries ({} bytes)",
        entries.len(),
        bytes.len()
    );
    Ok(bytes)
}
