use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::models::record::{Record, RecordKind};
use crate::state::AppState;

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<Vec<Record>>, AppError> {
    Ok(Json(state.store.list(RecordKind::Resume).await?))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<Record>>, AppError> {
    Ok(Json(state.store.list(RecordKind::JobDescription).await?))
}

/// GET /api/v1/records/:id
pub async fn handle_get_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Record>, AppError> {
    let record = state
        .store
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Record {id} not found")))?;
    Ok(Json(record))
}

/// DELETE /api/v1/records/:id
pub async fn handle_delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .store
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Record {id} not found")))?;
    state.store.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
