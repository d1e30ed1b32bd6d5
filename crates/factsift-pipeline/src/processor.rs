//! Single-entity processing: query → search → summarize → fallback.

use std::sync::Arc;

use factsift_core::{ExtractOptions, ExtractionRecord};
use factsift_search::SearchBackend;
use factsift_summarize::Summarizer;
use tracing::{debug, warn};

use crate::template::QueryTemplate;

/// Composes search, summarization and fallback extraction for one entity.
///
/// Network failures never escape: a failed search yields a `No results`
/// record and a failed summary leaves `summary` empty.
#[derive(Clone)]
pub struct EntityProcessor {
    search: Arc<dyn SearchBackend>,
    summarizer: Arc<dyn Summarizer>,
}

impl EntityProcessor {
    pub fn new(search: Arc<dyn SearchBackend>, summarizer: Arc<dyn Summarizer>) -> Self {
        Self { search, summarizer }
    }

    /// Process one entity in a single pass.
    pub async fn process(
        &self,
        entity: &str,
        template: &QueryTemplate,
        options: ExtractOptions,
    ) -> ExtractionRecord {
        let query = template.render(entity);

        let results = match self.search.search(&query).await {
            Ok(results) => results,
            Err(e) => {
                warn!(entity, error = %e, "Search failed");
                return ExtractionRecord::no_results(entity, query);
            }
        };
        if results.is_empty() {
            debug!(entity, "No search results");
            return ExtractionRecord::no_results(entity, query);
        }

        let context = results.context_text();

        let summary = match self.summarizer.summarize(&context, &query).await {
            Ok(summary) => Some(summary),
            Err(e) => {
                warn!(entity, error = %e, "Summarization failed");
                None
            }
        };

        let fallback = factsift_extract::extract(&context, options);

        ExtractionRecord {
            entity: entity.to_string(),
            query,
            summary,
            phones: fallback.phones,
            emails: fallback.emails,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Canned, MockSearch, MockSummarizer};
    use factsift_core::NO_RESULTS;

    const QUERY: &str = "Find the contact details of Acme Corp";

    fn processor(search: &Arc<MockSearch>, summarizer: &Arc<MockSummarizer>) -> EntityProcessor {
        EntityProcessor::new(search.clone(), summarizer.clone())
    }

    #[tokio::test]
    async fn test_full_pass() {
        let search = Arc::new(MockSearch::new().respond(
            QUERY,
            Canned::Snippets(vec![
                "Acme Corp HQ: sales@acme.example".into(),
                "Call +1 (555) 123-4567".into(),
            ]),
        ));
        let summarizer = Arc::new(MockSummarizer::new());

        let record = processor(&search, &summarizer)
            .process("Acme Corp", &QueryTemplate::default(), ExtractOptions::new(true, true))
            .await;

        assert_eq!(record.entity, "Acme Corp");
        assert_eq!(record.query, QUERY);
        assert!(record.summary.unwrap().starts_with("summary: Acme Corp HQ"));
        assert_eq!(record.emails, vec!["sales@acme.example"]);
        assert_eq!(record.phones, vec!["+1 (555) 123-4567"]);
        assert_eq!(summarizer.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_results_short_circuit() {
        let search = Arc::new(MockSearch::new().respond(QUERY, Canned::Snippets(vec![])));
        let summarizer = Arc::new(MockSummarizer::new());

        let record = processor(&search, &summarizer)
            .process("Acme Corp", &QueryTemplate::default(), ExtractOptions::new(true, true))
            .await;

        assert_eq!(record.summary.as_deref(), Some(NO_RESULTS));
        assert!(record.phones.is_empty());
        assert!(record.emails.is_empty());
        assert_eq!(search.calls(), 1);
        assert_eq!(summarizer.calls(), 0);
    }

    #[tokio::test]
    async fn test_search_failure_short_circuits() {
        let search = Arc::new(MockSearch::new().respond(QUERY, Canned::Fail));
        let summarizer = Arc::new(MockSummarizer::new());

        let record = processor(&search, &summarizer)
            .process("Acme Corp", &QueryTemplate::default(), ExtractOptions::new(true, false))
            .await;

        assert!(record.is_no_results());
        assert_eq!(summarizer.calls(), 0);
    }

    #[tokio::test]
    async fn test_summarizer_failure_keeps_fallback() {
        let search = Arc::new(
            MockSearch::new().respond(QUERY, Canned::Snippets(vec!["Phone 555-010-9999".into()])),
        );
        let summarizer = Arc::new(MockSummarizer::failing());

        let record = processor(&search, &summarizer)
            .process("Acme Corp", &QueryTemplate::default(), ExtractOptions::new(true, false))
            .await;

        assert!(record.summary.is_none());
        assert_eq!(record.phones, vec!["555-010-9999"]);
        assert_eq!(summarizer.calls(), 1);
    }
}
