//! Process configuration, built once at startup.
//!
//! Every client takes the pieces it needs from [`FactSiftConfig`] in its
//! constructor; nothing below the driver reads the environment directly.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_SERPAPI_URL: &str = "https://serpapi.com/search.json";
pub const DEFAULT_HUGGINGFACE_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-cnn";
pub const DEFAULT_SHEETS_API: &str = "https://sheets.googleapis.com/v4";
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;
pub const DEFAULT_PORT: u16 = 3010;

/// Search API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

/// Summarization API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    pub api_key: Option<String>,
    pub api_url: String,
}

/// Spreadsheet collaborator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsConfig {
    /// Service-account key file. Sheet features are disabled when unset.
    pub credentials_path: Option<PathBuf>,
    pub api_base: String,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            credentials_path: None,
            api_base: DEFAULT_SHEETS_API.into(),
        }
    }
}

/// Top-level FactSift configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactSiftConfig {
    pub search: SearchConfig,
    pub summarizer: SummarizerConfig,
    pub sheets: SheetsConfig,
    /// Upper bound on entities processed at once.
    pub max_concurrency: usize,
    /// Per-request transport timeout. `None` keeps the client default.
    pub http_timeout: Option<Duration>,
    /// HTTP server port.
    pub port: u16,
}

impl Default for FactSiftConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig {
                api_key: None,
                base_url: DEFAULT_SERPAPI_URL.into(),
            },
            summarizer: SummarizerConfig {
                api_key: None,
                api_url: DEFAULT_HUGGINGFACE_URL.into(),
            },
            sheets: SheetsConfig::default(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            http_timeout: None,
            port: DEFAULT_PORT,
        }
    }
}

impl FactSiftConfig {
    /// Create configuration from environment variables and defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let max_concurrency = match get("FACTSIFT_MAX_CONCURRENCY") {
            Some(v) => v.trim().parse::<usize>().map_err(|_| {
                Error::Config(format!("FACTSIFT_MAX_CONCURRENCY is not a number: {}", v))
            })?,
            None => defaults.max_concurrency,
        };

        let http_timeout = match get("FACTSIFT_HTTP_TIMEOUT_SECS") {
            Some(v) => Some(Duration::from_secs(v.trim().parse::<u64>().map_err(|_| {
                Error::Config(format!("FACTSIFT_HTTP_TIMEOUT_SECS is not a number: {}", v))
            })?)),
            None => None,
        };

        let port = match get("PORT") {
            Some(v) => v
                .trim()
                .parse::<u16>()
                .map_err(|_| Error::Config(format!("PORT is not a valid port: {}", v)))?,
            None => defaults.port,
        };

        Ok(Self {
            search: SearchConfig {
                api_key: get("SERPAPI_API_KEY"),
                base_url: get("SERPAPI_BASE_URL").unwrap_or(defaults.search.base_url),
            },
            summarizer: SummarizerConfig {
                api_key: get("HUGGINGFACE_API_KEY"),
                api_url: get("HUGGINGFACE_API_URL").unwrap_or(defaults.summarizer.api_url),
            },
            sheets: SheetsConfig {
                credentials_path: get("GOOGLE_CREDENTIALS_PATH").map(PathBuf::from),
                api_base: get("GOOGLE_SHEETS_API_URL").unwrap_or(defaults.sheets.api_base),
            },
            max_concurrency,
            http_timeout,
            port,
        })
    }

    /// Whether spreadsheet credentials were supplied.
    pub fn sheets_enabled(&self) -> bool {
        self.sheets.credentials_path.is_some()
    }
}
