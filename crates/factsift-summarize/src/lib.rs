//! FactSift Summarize: model-based answer extraction.
//!
//! The `Summarizer` trait turns a query plus concatenated search snippets
//! into one free-text answer. `HuggingFaceSummarizer` calls a hosted
//! summarization model (bart-large-cnn by default).

pub mod huggingface;

pub use huggingface::HuggingFaceSummarizer;

use async_trait::async_trait;
use factsift_core::Result;

/// Trait for summarization backends.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `text` with respect to `query`.
    ///
    /// Returns `NO_SUMMARY_EXTRACTED` when the model answered without a
    /// summary, and `SummarizerUnavailable` when the call itself failed.
    async fn summarize(&self, text: &str, query: &str) -> Result<String>;
}
