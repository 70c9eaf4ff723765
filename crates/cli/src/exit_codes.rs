//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract - scripts rely on them.
//!
//! | Code | Meaning                                         |
//! |------|-------------------------------------------------|
//! | 0    | Success                                         |
//! | 1    | General error (unspecified)                     |
//! | 2    | CLI usage error (bad args)                      |
//! | 3    | Input file missing, unreadable or unsupported   |
//! | 4    | Email column not found in the input             |
//! | 5    | Filter config invalid                           |
//! | 6    | Report could not be written                     |

use leadsift_filter::FilterError;
use leadsift_io::IoError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Input could not be read as a table.
pub const EXIT_INPUT: u8 = 3;

/// The email column is missing from the input schema.
pub const EXIT_MISSING_EMAIL: u8 = 4;

/// Filter config failed to parse or validate.
pub const EXIT_CONFIG: u8 = 5;

/// Output workbook or CSV directory could not be written.
pub const EXIT_WRITE: u8 = 6;

pub fn filter_exit_code(err: &FilterError) -> u8 {
    match err {
        FilterError::MissingEmailColumn { .. } => EXIT_MISSING_EMAIL,
        FilterError::ConfigParse(_)
        | FilterError::ConfigValidation(_)
        | FilterError::InvalidPattern(_) => EXIT_CONFIG,
        FilterError::RaggedRow { .. } => EXIT_INPUT,
    }
}

pub fn io_exit_code(err: &IoError) -> u8 {
    match err {
        IoError::UnreadableInput { .. }
        | IoError::UnsupportedFormat(_)
        | IoError::SheetNotFound { .. }
        | IoError::EmptyInput => EXIT_INPUT,
        IoError::Write(_) | IoError::Io(_) => EXIT_WRITE,
    }
}
