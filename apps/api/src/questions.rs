//! Interview question generation for a (resume, job level) pair.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extraction::prompts::{QUESTIONS_PROMPT_TEMPLATE, QUESTIONS_SYSTEM};
use crate::llm_client::{CallOptions, LlmClient};
use crate::models::record::{Record, RecordKind};
use crate::state::AppState;

const DEFAULT_NUM_QUESTIONS: u32 = 10;

/// Generates interview questions tailored to one candidate and one role.
pub async fn generate_interview_questions(
    resume: &Record,
    job: &Record,
    num_questions: u32,
    llm: &LlmClient,
) -> Result<Vec<String>, AppError> {
    let prompt = QUESTIONS_PROMPT_TEMPLATE
        .replace("{resume_json}", &display_json(resume))
        .replace("{job_json}", &display_json(job))
        .replace("{num_questions}", &num_questions.to_string());

    let response = llm
        .call(&prompt, QUESTIONS_SYSTEM, &CallOptions::generation())
        .await
        .map_err(|e| AppError::Llm(format!("question generation failed: {e}")))?;

    let text = response
        .text()
        .ok_or_else(|| AppError::Llm("LLM returned empty content".to_string()))?;

    Ok(parse_questions(text))
}

/// Record JSON for the prompt, with the embedding stripped — a
/// thousand-element vector adds nothing but token cost.
fn display_json(record: &Record) -> String {
    let mut copy = record.clone();
    copy.embedding = None;
    serde_json::to_string_pretty(&copy).unwrap_or_default()
}

/// One question per line; numbering prefixes are tolerated and removed.
fn parse_questions(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ')')
                .trim_start()
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct QuestionsRequest {
    pub resume_id: String,
    pub job_id: String,
    pub num_questions: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub resume_id: String,
    pub job_id: String,
    pub questions: Vec<String>,
}

/// POST /api/v1/questions
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Json(req): Json<QuestionsRequest>,
) -> Result<Json<QuestionsResponse>, AppError> {
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

    let questions = generate_interview_questions(
        &resume,
        &job,
        req.num_questions.unwrap_or(DEFAULT_NUM_QUESTIONS),
        &state.llm,
    )
    .await?;

    Ok(Json(QuestionsResponse {
        resume_id: req.resume_id,
        job_id: req.job_id,
        questions,
    }))
}
