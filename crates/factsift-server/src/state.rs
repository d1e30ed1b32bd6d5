//! Shared application state.

use factsift_core::{FactSiftConfig, Result};
use factsift_pipeline::EnrichmentPipeline;
use factsift_table::SheetConnector;

use crate::enrichment;

/// State shared by all route handlers. Immutable after startup.
pub struct AppState {
    pub config: FactSiftConfig,
    pub pipeline: EnrichmentPipeline,
    pub sheets: SheetConnector,
}

impl AppState {
    pub fn new(config: FactSiftConfig, pipeline: EnrichmentPipeline, sheets: SheetConnector) -> Self {
        Self {
            config,
            pipeline,
            sheets,
        }
    }

    /// Build clients from configuration. Fails if an API key is missing.
    pub fn from_config(config: FactSiftConfig) -> Result<Self> {
        let pipeline = enrichment::build_pipeline(&config)?;
        let sheets = enrichment::sheet_connector(&config)?;
        Ok(Self::new(config, pipeline, sheets))
    }
}
