use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::ingest::pipeline::{refresh_corpus, RefreshSummary};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub force_refresh: bool,
}

/// POST /api/v1/ingest/refresh
pub async fn handle_refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<RefreshSummary>, AppError> {
    let summary = refresh_corpus(&state, req.force_refresh).await?;
    Ok(Json(summary))
}
