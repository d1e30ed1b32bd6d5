//! Search response types.

use serde::{Deserialize, Serialize};

/// Ordered snippets returned for one query. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub snippets: Vec<String>,
}

impl SearchResult {
    pub fn new(snippets: Vec<String>) -> Self {
        Self { snippets }
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    /// All snippets space-joined into one context block.
    pub fn context_text(&self) -> String {
        self.snippets.join(" ")
    }
}

/// Raw SerpAPI body; only the fields we read.
#[derive(Debug, Deserialize)]
pub(crate) struct SerpApiResponse {
    #[serde(default)]
    pub organic_results: Option<Vec<OrganicResult>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrganicResult {
    #[serde(default)]
    pub snippet: Option<String>,
}

impl From<SerpApiResponse> for SearchResult {
    fn from(resp: SerpApiResponse) -> Self {
        let snippets = resp
            .organic_results
            .unwrap_or_default()
            .into_iter()
            .map(|r| r.snippet.unwrap_or_default())
            .collect();
        Self { snippets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_snippets_become_empty_strings() {
        let raw: SerpApiResponse = serde_json::from_value(serde_json::json!({
            "organic_results": [
                {"snippet": "first"},
                {"title": "no snippet here"},
                {"snippet": "third"}
            ]
        }))
        .unwrap();
        let result = SearchResult::from(raw);
        assert_eq!(result.snippets, vec!["first", "", "third"]);
        assert_eq!(result.context_text(), "first  third");
    }

    #[test]
    fn test_missing_organic_results_is_empty() {
        let raw: SerpApiResponse =
            serde_json::from_value(serde_json::json!({"search_metadata": {}})).unwrap();
        assert!(SearchResult::from(raw).is_empty());
    }
}
