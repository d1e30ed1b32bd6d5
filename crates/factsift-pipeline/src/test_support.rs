//! In-memory search/summarizer doubles with call counters.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use factsift_core::{Error, Result};
use factsift_search::{SearchBackend, SearchResult};
use factsift_summarize::Summarizer;

pub enum Canned {
    Snippets(Vec<String>),
    Fail,
}

#[derive(Default)]
pub struct MockSearch {
    responses: HashMap<String, Canned>,
    delays: HashMap<String, Duration>,
    calls: AtomicUsize,
}

impl MockSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, query: &str, canned: Canned) -> Self {
        self.responses.insert(query.to_string(), canned);
        self
    }

    pub fn delay(mut self, query: &str, millis: u64) -> Self {
        self.delays
            .insert(query.to_string(), Duration::from_millis(millis));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchBackend for MockSearch {
    async fn search(&self, query: &str) -> Result<SearchResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        match self.responses.get(query) {
            Some(Canned::Snippets(s)) => Ok(SearchResult::new(s.clone())),
            Some(Canned::Fail) => Err(Error::SearchUnavailable("mock failure".into())),
            None => Ok(SearchResult::default()),
        }
    }
}

/// Echoes the first 40 characters of the context, or fails on demand.
#[derive(Default)]
pub struct MockSummarizer {
    fail: bool,
    calls: AtomicUsize,
}

impl MockSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(&self, text: &str, _query: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::SummarizerUnavailable("mock failure".into()));
        }
        Ok(format!("summary: {}", text.chars().take(40).collect::<String>()))
    }
}
