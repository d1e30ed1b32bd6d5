//! SerpAPI client.

use async_trait::async_trait;
use factsift_core::{Error, FactSiftConfig, Result};
use reqwest::Client;
use tracing::debug;

use crate::types::{SearchResult, SerpApiResponse};
use crate::SearchBackend;

/// Google results through SerpAPI (`GET search.json?q=..&api_key=..`).
#[derive(Clone)]
pub struct SerpApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SerpApiClient {
    /// Build from process configuration. Fails when no API key is set.
    pub fn from_config(config: &FactSiftConfig) -> Result<Self> {
        let api_key = config
            .search
            .api_key
            .clone()
            .ok_or_else(|| Error::Config("SERPAPI_API_KEY is not set".into()))?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.search.base_url.clone(),
            api_key,
        })
    }

    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl SearchBackend for SerpApiClient {
    async fn search(&self, query: &str) -> Result<SearchResult> {
        if query.trim().is_empty() {
            return Err(Error::EmptyQuery);
        }

        debug!(query, "SerpAPI search");

        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("q", query), ("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| Error::SearchUnavailable(format!("Request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::SearchUnavailable(format!(
                "API error {}: {}",
                status, body
            )));
        }

        let parsed: SerpApiResponse = resp
            .json()
            .await
            .map_err(|e| Error::SearchUnavailable(format!("Invalid response body: {}", e)))?;

        let result = SearchResult::from(parsed);
        debug!(query, snippets = result.len(), "SerpAPI search complete");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> SerpApiClient {
        SerpApiClient::new(
            Client::new(),
            format!("{}/search.json", server.uri()),
            "test-key",
        )
    }

    #[tokio::test]
    async fn test_search_returns_snippets() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search.json"))
            .and(query_param("q", "Find the contact details of Acme Corp"))
            .and(query_param("api_key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "organic_results": [
                    {"snippet": "Acme Corp, call +1 555 123 4567"},
                    {"link": "https://acme.example"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client
            .search("Find the contact details of Acme Corp")
            .await
            .unwrap();
        assert_eq!(result.snippets, vec!["Acme Corp, call +1 555 123 4567", ""]);
    }

    #[tokio::test]
    async fn test_non_success_status_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.search("anything").await.unwrap_err();
        assert!(matches!(err, Error::SearchUnavailable(ref m) if m.contains("429")));
    }

    #[tokio::test]
    async fn test_empty_query_skips_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(matches!(client.search("   ").await, Err(Error::EmptyQuery)));
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = FactSiftConfig::default();
        assert!(matches!(
            SerpApiClient::from_config(&config),
            Err(Error::Config(_))
        ));
    }
}
