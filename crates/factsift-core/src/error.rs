//! Error types for FactSift.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Search unavailable: {0}")]
    SearchUnavailable(String),

    #[error("Summarizer unavailable: {0}")]
    SummarizerUnavailable(String),

    #[error("Column '{column}' not found (available: {})", available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("Invalid query template: {0}")]
    InvalidTemplate(String),

    #[error("Spreadsheet access error: {0}")]
    SheetAccess(String),

    #[error("Search query is empty")]
    EmptyQuery,

    #[error("Table error: {0}")]
    Table(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Whether this error comes from user-supplied run settings
    /// (column name, template) rather than from I/O.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Error::MissingColumn { .. } | Error::InvalidTemplate(_) | Error::EmptyQuery
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
