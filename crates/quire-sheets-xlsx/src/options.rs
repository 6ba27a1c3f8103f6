//! Reader and writer settings

/// What the reader does with content it cannot represent faithfully
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnsupportedPolicy {
    /// Fail with `UnsupportedFeature` (formulas, error cells, date cells)
    #[default]
    Reject,
    /// Keep formulas as opaque `CellValue::Formula` and error/date cells as
    /// inline strings of their raw text
    KeepOpaque,
}

/// Settings for reading a package
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    pub unsupported: UnsupportedPolicy,
}

impl ReadOptions {
    /// Options that keep unsupported content instead of rejecting it
    pub fn keep_opaque() -> Self {
        Self {
            unsupported: UnsupportedPolicy::KeepOpaque,
        }
    }
}

/// Compression applied to every archive entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    #[default]
    Deflated,
    Stored,
}

impl Compression {
    pub(crate) fn method(self) -> zip::CompressionMethod {
        match self {
            Compression::Deflated => zip::CompressionMethod::Deflated,
            Compression::Stored => zip::CompressionMethod::Stored,
        }
    }
}

/// Settings for writing a package
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    pub compression: Compression,
}

impl WriteOptions {
    /// Options writing uncompressed entries
    pub fn stored() -> Self {
        Self {
            compression: Compression::Stored,
        }
    }
}
