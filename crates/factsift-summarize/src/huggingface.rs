//! Hugging Face inference API summarizer.

use async_trait::async_trait;
use factsift_core::{Error, FactSiftConfig, Result, NO_SUMMARY_EXTRACTED};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Summarizer;

#[derive(Serialize)]
struct SummaryRequest {
    inputs: String,
}

#[derive(Deserialize)]
struct SummaryItem {
    #[serde(default)]
    summary_text: Option<String>,
}

/// Summarizer backed by a hosted inference endpoint.
#[derive(Clone)]
pub struct HuggingFaceSummarizer {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HuggingFaceSummarizer {
    /// Build from process configuration. Fails when no API key is set.
    pub fn from_config(config: &FactSiftConfig) -> Result<Self> {
        let api_key = config
            .summarizer
            .api_key
            .clone()
            .ok_or_else(|| Error::Config("HUGGINGFACE_API_KEY is not set".into()))?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.summarizer.api_url.clone(),
            api_key,
        })
    }

    pub fn new(client: Client, api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }
}

/// Model input combining the query and the snippet context.
pub fn build_input(text: &str, query: &str) -> String {
    format!("Query: {} Context: {}", query, text)
}

#[async_trait]
impl Summarizer for HuggingFaceSummarizer {
    async fn summarize(&self, text: &str, query: &str) -> Result<String> {
        let body = SummaryRequest {
            inputs: build_input(text, query),
        };

        debug!(query, context_len = text.len(), "Requesting summary");

        let resp = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::SummarizerUnavailable(format!("Request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::SummarizerUnavailable(format!(
                "API error {}: {}",
                status, body
            )));
        }

        let items: Vec<SummaryItem> = resp.json().await.map_err(|e| {
            Error::SummarizerUnavailable(format!("Invalid response body: {}", e))
        })?;

        Ok(items
            .into_iter()
            .next()
            .and_then(|item| item.summary_text)
            .unwrap_or_else(|| NO_SUMMARY_EXTRACTED.to_string()))
    }
}
