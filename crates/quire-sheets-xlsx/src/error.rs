//! XLSX error types

use thiserror::Error;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors that can occur during XLSX reading/writing
#[derive(Debug, Error)]
pub enum XlsxError {
    /// The byte stream is not a readable zip container
    #[error("Corrupt archive: {0}")]
    CorruptArchive(String),

    /// A part is not well-formed or breaks a structural rule of its schema
    #[error("Malformed part {part}: {reason}")]
    MalformedPart { part: String, reason: String },

    /// A reference between parts or into a table does not resolve
    #[error("Inconsistent references: {0}")]
    InconsistentReferences(String),

    /// Content this engine does not represent (e.g. a formula)
    #[error("Unsupported feature in {part}: {feature}")]
    UnsupportedFeature { part: String, feature: String },

    /// A session step was called out of order
    #[error("Invalid state: cannot {action} while {stage}")]
    InvalidState {
        action: &'static str,
        stage: &'static str,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Core model error
    #[error("Core error: {0}")]
    Core(#[from] quire_sheets_core::Error),
}

impl XlsxError {
    pub(crate) fn malformed(part: impl Into<String>, reason: impl Into<String>) -> Self {
        XlsxError::MalformedPart {
            part: part.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported(part: impl Into<String>, feature: impl Into<String>) -> Self {
        XlsxError::UnsupportedFeature {
            part: part.into(),
            feature: feature.into(),
        }
    }

    /// Check whether this wraps a table lookup with an invalid index
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(
            self,
            XlsxError::Core(quire_sheets_core::Error::IndexOutOfRange { .. })
        )
    }
}

impl From<zip::result::ZipError> for XlsxError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => XlsxError::Io(e),
            other => XlsxError::CorruptArchive(other.to_string()),
        }
    }
}
