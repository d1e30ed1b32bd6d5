//! FactSift Core: error type, configuration, per-entity record types.

pub mod config;
pub mod error;
pub mod types;

pub use config::{FactSiftConfig, SearchConfig, SheetsConfig, SummarizerConfig};
pub use error::{Error, Result};
pub use types::{ExtractOptions, ExtractionRecord, NO_RESULTS, NO_SUMMARY_EXTRACTED};
