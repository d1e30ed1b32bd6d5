//! Run settings validation and the table-level enrichment call.

use std::sync::Arc;

use factsift_core::{Error, ExtractOptions, ExtractionRecord, FactSiftConfig, Result};
use factsift_pipeline::{EnrichmentPipeline, EntityProcessor, ProgressSink, QueryTemplate};
use factsift_search::SerpApiClient;
use factsift_summarize::HuggingFaceSummarizer;
use factsift_table::{SheetConnector, Table};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

/// What the user asked for in one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSettings {
    pub column: String,
    pub template: String,
    #[serde(default)]
    pub extract_phone: bool,
    #[serde(default)]
    pub extract_email: bool,
}

impl RunSettings {
    pub fn options(&self) -> ExtractOptions {
        ExtractOptions::new(self.extract_phone, self.extract_email)
    }
}

/// Validated inputs for a pipeline run.
#[derive(Debug, Clone)]
pub struct PreparedRun {
    pub entities: Vec<String>,
    pub template: QueryTemplate,
    pub options: ExtractOptions,
}

/// Outcome of enriching a table.
#[derive(Debug, Clone)]
pub struct EnrichedTable {
    pub table: Table,
    pub records: Vec<ExtractionRecord>,
}

impl EnrichedTable {
    pub fn without_results(&self) -> usize {
        self.records.iter().filter(|r| r.is_no_results()).count()
    }
}

/// Build the search + summarize pipeline from process configuration.
pub fn build_pipeline(config: &FactSiftConfig) -> Result<EnrichmentPipeline> {
    let search = SerpApiClient::from_config(config)?;
    let summarizer = HuggingFaceSummarizer::from_config(config)?;
    let processor = EntityProcessor::new(Arc::new(search), Arc::new(summarizer));
    Ok(EnrichmentPipeline::new(processor, config.max_concurrency))
}

/// Spreadsheet connector sharing the configured transport timeout.
pub fn sheet_connector(config: &FactSiftConfig) -> Result<SheetConnector> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.http_timeout {
        builder = builder.timeout(timeout);
    }
    let client = builder
        .build()
        .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
    Ok(SheetConnector::from_config(&config.sheets, client))
}

/// Check the column and template against a loaded table.
///
/// Runs before any network call, so a bad column or template never
/// starts a run.
pub fn prepare(table: &Table, settings: &RunSettings) -> Result<PreparedRun> {
    let entities = table.column_values(&settings.column)?;
    let template = QueryTemplate::parse(&settings.template)?;
    Ok(PreparedRun {
        entities,
        template,
        options: settings.options(),
    })
}

/// Validate, run the pipeline and merge the records into the table.
pub async fn enrich_table<P>(
    pipeline: &EnrichmentPipeline,
    table: &Table,
    settings: &RunSettings,
    progress: &P,
) -> Result<EnrichedTable>
where
    P: ProgressSink + ?Sized,
{
    let run = prepare(table, settings)?;
    info!(
        column = %settings.column,
        entities = run.entities.len(),
        phones = run.options.phones,
        emails = run.options.emails,
        "Enriching table"
    );

    let records = pipeline
        .run(&run.entities, &run.template, run.options, progress)
        .await;
    let merged = table.with_results(&records)?;

    Ok(EnrichedTable {
        table: merged,
        records,
    })
}
