//! CSV upload routes: preview and enrich.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use factsift_pipeline::{LogProgress, DEFAULT_TEMPLATE};
use factsift_table::Table;

use super::{parse_flag, ApiError, PREVIEW_ROWS};
use crate::enrichment::{self, EnrichedTable, RunSettings};
use crate::state::AppState;

pub const CSV_FILENAME: &str = "extracted_data.csv";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/preview", post(preview))
        .route("/enrich", post(enrich))
}

/// Multipart body: one `file` part plus plain text fields.
struct UploadForm {
    file: Option<Vec<u8>>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut file = None;
        let mut fields = HashMap::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();
            if name == "file" {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;
                file = Some(bytes.to_vec());
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Invalid field '{}': {}", name, e)))?;
                fields.insert(name, value);
            }
        }

        Ok(Self { file, fields })
    }

    fn table(&self) -> Result<Table, ApiError> {
        let bytes = self
            .file
            .as_deref()
            .ok_or_else(|| ApiError::BadRequest("No file uploaded".into()))?;
        Table::from_csv_bytes(bytes)
            .map_err(|e| ApiError::BadRequest(format!("Could not read CSV: {}", e)))
    }

    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn flag(&self, name: &str) -> bool {
        self.field(name).map(parse_flag).unwrap_or(false)
    }

    fn settings(&self) -> Result<RunSettings, ApiError> {
        let column = self
            .field("column")
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ApiError::BadRequest("Missing 'column' field".into()))?;
        Ok(RunSettings {
            column: column.to_string(),
            template: self.field("template").unwrap_or(DEFAULT_TEMPLATE).to_string(),
            extract_phone: self.flag("extract_phone"),
            extract_email: self.flag("extract_email"),
        })
    }
}

pub(crate) fn preview_json(table: &Table) -> serde_json::Value {
    let head = table.head(PREVIEW_ROWS);
    serde_json::json!({
        "columns": head.columns,
        "rows": head.rows,
        "totalRows": table.len(),
    })
}

pub(crate) fn enriched_json(result: &EnrichedTable) -> serde_json::Value {
    serde_json::json!({
        "columns": result.table.columns,
        "rows": result.table.rows,
        "records": result.records,
        "totalRows": result.table.len(),
        "noResults": result.without_results(),
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/preview: header and first rows of an uploaded CSV.
async fn preview(multipart: Multipart) -> Result<Json<serde_json::Value>, ApiError> {
    let form = UploadForm::read(multipart).await?;
    let table = form.table()?;
    Ok(Json(preview_json(&table)))
}

/// POST /api/enrich: run the pipeline over one column of an uploaded CSV.
async fn enrich(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let form = UploadForm::read(multipart).await?;
    let table = form.table()?;
    let settings = form.settings()?;

    let result = enrichment::enrich_table(&state.pipeline, &table, &settings, &LogProgress).await?;

    if form.field("format") == Some("csv") {
        let body = result.table.to_csv_string()?;
        let disposition = format!("attachment; filename=\"{}\"", CSV_FILENAME);
        return Ok((
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            body,
        )
            .into_response());
    }

    Ok(Json(enriched_json(&result)).into_response())
}
