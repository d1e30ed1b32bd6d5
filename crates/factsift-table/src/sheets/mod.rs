//! Google Sheets source and sink (first worksheet only).
//!
//! Reads go through `values.get` on the whole worksheet; writes append
//! every row in a single `values.append` call.

pub mod auth;

pub use auth::{ServiceAccountKey, ServiceAccountTokens, StaticToken, TokenSource};

use std::sync::Arc;

use async_trait::async_trait;
use factsift_core::{Error, Result, SheetsConfig};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::table::Table;
use crate::{TableSink, TableSource};

pub use factsift_core::config::DEFAULT_SHEETS_API;

#[derive(Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Deserialize)]
struct SheetProperties {
    title: String,
    #[serde(default)]
    index: i64,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Deserialize)]
struct AppendResponse {
    #[serde(default)]
    updates: Option<AppendUpdates>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendUpdates {
    #[serde(default)]
    updated_rows: Option<u64>,
}

/// Extract the spreadsheet id from a share URL, or accept a bare id.
pub fn spreadsheet_id_from_url(url: &str) -> Result<String> {
    let url = url.trim();
    if let Some(pos) = url.find("/spreadsheets/d/") {
        let rest = &url[pos + "/spreadsheets/d/".len()..];
        let id: String = rest
            .chars()
            .take_while(|c| !matches!(c, '/' | '?' | '#'))
            .collect();
        if !id.is_empty() {
            return Ok(id);
        }
    }
    let is_bare_id = !url.is_empty()
        && url
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if is_bare_id {
        return Ok(url.to_string());
    }
    Err(Error::SheetAccess(format!("Not a spreadsheet URL: {}", url)))
}

/// A1 range covering a whole worksheet.
fn sheet_range(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// The first worksheet of one spreadsheet.
pub struct GoogleSheet {
    client: Client,
    api_base: String,
    spreadsheet_id: String,
    tokens: Arc<dyn TokenSource>,
}

impl GoogleSheet {
    pub fn open_by_url(url: &str, client: Client, tokens: Arc<dyn TokenSource>) -> Result<Self> {
        Ok(Self {
            client,
            api_base: DEFAULT_SHEETS_API.into(),
            spreadsheet_id: spreadsheet_id_from_url(url)?,
            tokens,
        })
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| Error::SheetAccess(format!("Invalid Sheets API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::SheetAccess("Sheets API URL cannot take a path".into()))?
            .pop_if_empty()
            .push("spreadsheets")
            .push(&self.spreadsheet_id)
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: Url) -> Result<T> {
        let token = self.tokens.access_token().await?;
        let resp = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| Error::SheetAccess(format!("Request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::SheetAccess(format!("API error {}: {}", status, body)));
        }
        resp.json()
            .await
            .map_err(|e| Error::SheetAccess(format!("Invalid response body: {}", e)))
    }

    /// Title of the worksheet with the lowest index.
    pub async fn first_worksheet_title(&self) -> Result<String> {
        let mut url = self.endpoint(&[])?;
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties(title,index)");
        let meta: SpreadsheetMeta = self.get_json(url).await?;

        meta.sheets
            .into_iter()
            .min_by_key(|s| s.properties.index)
            .map(|s| s.properties.title)
            .ok_or_else(|| Error::SheetAccess("Spreadsheet has no worksheets".into()))
    }

    /// All rows of the first worksheet; the first row is the header.
    pub async fn read_all(&self) -> Result<Table> {
        let title = self.first_worksheet_title().await?;
        let range = sheet_range(&title);
        let url = self.endpoint(&["values", &range])?;
        let values: ValueRange = self.get_json(url).await?;

        let grid: Vec<Vec<String>> = values
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect();
        if grid.is_empty() {
            return Err(Error::SheetAccess(format!("Worksheet '{}' is empty", title)));
        }
        let table = Table::from_grid(grid)
            .map_err(|e| Error::SheetAccess(format!("Worksheet '{}': {}", title, e)))?;

        info!(
            spreadsheet = %self.spreadsheet_id,
            worksheet = %title,
            rows = table.len(),
            "Loaded worksheet"
        );
        Ok(table)
    }

    /// Append rows below the existing data of the first worksheet.
    pub async fn append_rows(&self, rows: &[Vec<String>]) -> Result<()> {
        if rows.is_empty() {
            debug!("No rows to append");
            return Ok(());
        }

        let title = self.first_worksheet_title().await?;
        let append = format!("{}:append", sheet_range(&title));
        let mut url = self.endpoint(&["values", &append])?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "RAW")
            .append_pair("insertDataOption", "INSERT_ROWS");

        let token = self.tokens.access_token().await?;
        let resp = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&json!({ "majorDimension": "ROWS", "values": rows }))
            .send()
            .await
            .map_err(|e| Error::SheetAccess(format!("Append request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::SheetAccess(format!("API error {}: {}", status, body)));
        }

        let appended: AppendResponse = resp
            .json()
            .await
            .map_err(|e| Error::SheetAccess(format!("Invalid append response: {}", e)))?;
        let updated = appended
            .updates
            .and_then(|u| u.updated_rows)
            .unwrap_or(rows.len() as u64);

        info!(
            spreadsheet = %self.spreadsheet_id,
            worksheet = %title,
            rows = updated,
            "Appended rows"
        );
        Ok(())
    }
}

/// Opens spreadsheets with the process-wide credentials.
///
/// Credential problems are kept rather than raised, so that only the
/// sheet operations fail and the rest of the process keeps working.
pub struct SheetConnector {
    client: Client,
    api_base: String,
    tokens: std::result::Result<Arc<dyn TokenSource>, String>,
}

impl SheetConnector {
    pub fn from_config(config: &SheetsConfig, client: Client) -> Self {
        let tokens = match &config.credentials_path {
            None => Err("GOOGLE_CREDENTIALS_PATH is not set".to_string()),
            Some(path) => match ServiceAccountTokens::from_key_file(path, client.clone()) {
                Ok(tokens) => Ok(Arc::new(tokens) as Arc<dyn TokenSource>),
                Err(e) => {
                    warn!("Spreadsheet access disabled: {}", e);
                    Err(e.to_string())
                }
            },
        };
        Self {
            client,
            api_base: config.api_base.clone(),
            tokens,
        }
    }

    pub fn with_tokens(
        tokens: Arc<dyn TokenSource>,
        client: Client,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into(),
            tokens: Ok(tokens),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.tokens.is_ok()
    }

    pub fn open(&self, url: &str) -> Result<GoogleSheet> {
        let tokens = self.tokens.clone().map_err(Error::SheetAccess)?;
        Ok(GoogleSheet::open_by_url(url, self.client.clone(), tokens)?
            .with_api_base(self.api_base.clone()))
    }
}

#[async_trait]
impl TableSource for GoogleSheet {
    async fn load(&self) -> Result<Table> {
        self.read_all().await
    }
}

#[async_trait]
impl TableSink for GoogleSheet {
    async fn write(&self, table: &Table) -> Result<()> {
        self.append_rows(&table.rows).await
    }
}
