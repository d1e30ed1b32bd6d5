//! FactSift Search: web search backends.
//!
//! Provides the `SearchBackend` trait. `SerpApiClient` talks to SerpAPI's
//! JSON endpoint and returns the snippet of every organic result.

pub mod serpapi;
pub mod types;

pub use serpapi::SerpApiClient;
pub use types::SearchResult;

use async_trait::async_trait;
use factsift_core::Result;

/// Trait for search backends.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run one keyword query. A single attempt, no retry.
    async fn search(&self, query: &str) -> Result<SearchResult>;
}
