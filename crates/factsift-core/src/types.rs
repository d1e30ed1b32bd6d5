//! Per-entity record types shared by the pipeline and the table layer.

use serde::{Deserialize, Serialize};

/// Summary recorded when the search returned nothing for an entity.
pub const NO_RESULTS: &str = "No results";

/// Summary returned when the model response carries no summary field.
pub const NO_SUMMARY_EXTRACTED: &str = "No summary extracted";

/// Which fallback patterns to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractOptions {
    pub phones: bool,
    pub emails: bool,
}

impl ExtractOptions {
    pub fn new(phones: bool, emails: bool) -> Self {
        Self { phones, emails }
    }
}

/// Output for one entity. Created once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRecord {
    pub entity: String,
    pub query: String,
    /// Model summary. `None` when the summarizer call failed.
    pub summary: Option<String>,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
}

impl ExtractionRecord {
    /// Record for an entity whose search produced no usable results.
    pub fn no_results(entity: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            query: query.into(),
            summary: Some(NO_RESULTS.to_string()),
            phones: Vec::new(),
            emails: Vec::new(),
        }
    }

    pub fn is_no_results(&self) -> bool {
        self.summary.as_deref() == Some(NO_RESULTS)
    }
}
