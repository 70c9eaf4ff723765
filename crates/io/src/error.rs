use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    /// Input could not be opened or parsed as a table.
    #[error("cannot read {}: {reason}", path.display())]
    UnreadableInput { path: PathBuf, reason: String },

    /// File extension is not a known table format.
    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// The requested worksheet does not exist.
    #[error("sheet '{name}' not found (available: {})", available.join(", "))]
    SheetNotFound { name: String, available: Vec<String> },

    /// No header row.
    #[error("input has no header row")]
    EmptyInput,

    /// Report could not be serialized or written.
    #[error("write failed: {0}")]
    Write(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rust_xlsxwriter::XlsxError> for IoError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        Self::Write(e.to_string())
    }
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        Self::Write(e.to_string())
    }
}
