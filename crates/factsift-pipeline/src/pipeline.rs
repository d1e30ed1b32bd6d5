//! Bounded, order-preserving fan-out over an entity list.

use std::sync::Arc;

use factsift_core::{ExtractOptions, ExtractionRecord};
use futures::stream::{self, StreamExt};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::processor::EntityProcessor;
use crate::progress::ProgressSink;
use crate::template::QueryTemplate;

/// Runs an [`EntityProcessor`] over many entities concurrently.
#[derive(Clone)]
pub struct EnrichmentPipeline {
    processor: Arc<EntityProcessor>,
    max_concurrency: usize,
}

impl EnrichmentPipeline {
    /// `max_concurrency` of 0 is treated as 1.
    pub fn new(processor: EntityProcessor, max_concurrency: usize) -> Self {
        Self {
            processor: Arc::new(processor),
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Process every entity and return one record per entity.
    ///
    /// `result[i]` always belongs to `entities[i]`, whatever order the
    /// workers finish in. `progress` is called once per completed entity.
    /// There is no cancellation: the call returns when every entity has a
    /// record.
    pub async fn run<P>(
        &self,
        entities: &[String],
        template: &QueryTemplate,
        options: ExtractOptions,
        progress: &P,
    ) -> Vec<ExtractionRecord>
    where
        P: ProgressSink + ?Sized,
    {
        let total = entities.len();
        let span = info_span!("enrichment", run_id = %Uuid::new_v4(), entities = total);

        async move {
            info!(
                concurrency = self.max_concurrency,
                template = %template,
                "Starting enrichment run"
            );

            let mut slots: Vec<Option<ExtractionRecord>> = vec![None; total];
            let processor = &self.processor;

            // Collected up front so the returned future stays `Send`.
            let jobs: Vec<_> = entities
                .iter()
                .enumerate()
                .map(|(index, entity)| async move {
                    let record = processor.process(entity, template, options).await;
                    (index, record)
                })
                .collect();
            let mut completions = stream::iter(jobs).buffer_unordered(self.max_concurrency);

            let mut completed = 0usize;
            while let Some((index, record)) = completions.next().await {
                slots[index] = Some(record);
                completed += 1;
                progress.report(completed, total);
            }

            let records: Vec<ExtractionRecord> = slots
                .into_iter()
                .zip(entities)
                .map(|(slot, entity)| {
                    slot.unwrap_or_else(|| {
                        ExtractionRecord::no_results(entity.as_str(), template.render(entity))
                    })
                })
                .collect();

            let without_results = records.iter().filter(|r| r.is_no_results()).count();
            info!(
                completed = records.len(),
                without_results, "Enrichment run complete"
            );
            records
        }
        .instrument(span)
        .await
    }
}
