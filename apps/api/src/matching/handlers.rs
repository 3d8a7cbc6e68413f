use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::{analyze_pair, find_top_matches, MatchAnalysis, MatchParams};
use crate::models::record::{Record, RecordKind};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub job_id: String,
    pub top_n: Option<usize>,
    pub similarity_threshold: Option<f64>,
}

/// One match in the response: the full original resume record plus score,
/// so the caller can render every candidate field without a second lookup.
#[derive(Debug, Serialize)]
pub struct MatchEntry {
    pub record: Record,
    pub score: f64,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub job_id: String,
    pub candidates_considered: usize,
    pub matches: Vec<MatchEntry>,
}

/// POST /api/v1/match
///
/// An empty `matches` array is a successful response ("no candidates met
/// the threshold"), distinct from the 422 returned when the job record has
/// no embedding.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(req): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let job = state
        .store
        .get(&req.job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job description {} not found", req.job_id)))?;

    if job.kind != RecordKind::JobDescription {
        return Err(AppError::Validation(format!(
            "Record {} is a {}, not a job description",
            req.job_id,
            job.kind.as_str()
        )));
    }

    let params = MatchParams {
        top_n: req.top_n.unwrap_or(state.config.match_top_n),
        similarity_threshold: req
            .similarity_threshold
            .unwrap_or(state.config.similarity_threshold),
    };
    if params.top_n == 0 {
        return Err(AppError::Validation("top_n must be at least 1".to_string()));
    }

    let candidates = state.store.list(RecordKind::Resume).await?;
    let matches = find_top_matches(&job, &candidates, params)?;

    let entries = matches
        .into_iter()
        .map(|m| MatchEntry {
            record: m.record.clone(),
            score: m.score,
        })
        .collect();

    Ok(Json(MatchResponse {
        job_id: req.job_id,
        candidates_considered: candidates.len(),
        matches: entries,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub resume_id: String,
    pub job_id: String,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub resume_id: String,
    pub job_id: String,
    #[serde(flatten)]
    pub analysis: MatchAnalysis,
}

/// POST /api/v1/analysis
///
/// Drill-down on a single (resume, job) pair: skills overlap, experience
/// keywords, and the embedding similarity as a percentage.
pub async fn handle_analysis(
    State(state): State<AppState>,
    Json(req): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let resume = state
        .store
        .get(&req.resume_id)
        .await?
        .filter(|r| r.kind == RecordKind::Resume)
        .ok_or_else(|| AppError::NotFound(format!("Resume {} not found", req.resume_id)))?;

    let job = state
        .store
        .get(&req.job_id)
        .await?
        .filter(|r| r.kind == RecordKind::JobDescription)
        .ok_or_else(|| AppError::NotFound(format!("Job description {} not found", req.job_id)))?;

    let analysis = analyze_pair(&resume, &job);

    Ok(Json(AnalysisResponse {
        resume_id: req.resume_id,
        job_id: req.job_id,
        analysis,
    }))
}
