use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    /// The email column is not part of the input schema.
    #[error("missing column '{column}' (found: {})", available.join(", "))]
    MissingEmailColumn { column: String, available: Vec<String> },

    /// A row does not have one cell per column.
    #[error("row {row}: expected {expected} cell(s), found {found}")]
    RaggedRow { row: usize, expected: usize, found: usize },

    /// Keyword rules did not compile into a valid pattern.
    #[error("invalid keyword pattern: {0}")]
    InvalidPattern(String),

    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// Config validation error (blank entries, no rules, etc.).
    #[error("config validation error: {0}")]
    ConfigValidation(String),
}

impl From<regex::Error> for FilterError {
    fn from(e: regex::Error) -> Self {
        Self::InvalidPattern(e.to_string())
    }
}
