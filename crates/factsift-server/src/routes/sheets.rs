//! Google Sheets routes: preview and enrich, with optional write-back.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use factsift_pipeline::{LogProgress, DEFAULT_TEMPLATE};
use factsift_table::{TableSink, TableSource};
use serde::Deserialize;
use tracing::warn;

use super::enrich::{enriched_json, preview_json};
use super::ApiError;
use crate::enrichment::{self, RunSettings};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sheets/preview", post(preview_sheet))
        .route("/sheets/enrich", post(enrich_sheet))
}

#[derive(Deserialize)]
struct SheetPreviewRequest {
    sheet_url: String,
}

#[derive(Deserialize)]
struct SheetEnrichRequest {
    sheet_url: String,
    column: String,
    #[serde(default = "default_template")]
    template: String,
    #[serde(default)]
    extract_phone: bool,
    #[serde(default)]
    extract_email: bool,
    #[serde(default)]
    update_sheet: bool,
}

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

/// POST /api/sheets/preview
async fn preview_sheet(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SheetPreviewRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let sheet = state.sheets.open(&req.sheet_url)?;
    let table = sheet.load().await?;
    Ok(Json(preview_json(&table)))
}

/// POST /api/sheets/enrich
///
/// A failed write-back is reported in `sheetError`; the enriched table
/// is still returned.
async fn enrich_sheet(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SheetEnrichRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let sheet = state.sheets.open(&req.sheet_url)?;
    let table = sheet.load().await?;
    let settings = RunSettings {
        column: req.column,
        template: req.template,
        extract_phone: req.extract_phone,
        extract_email: req.extract_email,
    };

    let result = enrichment::enrich_table(&state.pipeline, &table, &settings, &LogProgress).await?;

    let mut body = enriched_json(&result);
    let (updated, sheet_error) = if req.update_sheet {
        match sheet.write(&result.table).await {
            Ok(()) => (true, None),
            Err(e) => {
                warn!(spreadsheet = %sheet.spreadsheet_id(), "Sheet update failed: {}", e);
                (false, Some(e.to_string()))
            }
        }
    } else {
        (false, None)
    };
    body["sheetUpdated"] = serde_json::Value::Bool(updated);
    body["sheetError"] = sheet_error.map(serde_json::Value::String).unwrap_or_default();

    Ok(Json(body))
}
