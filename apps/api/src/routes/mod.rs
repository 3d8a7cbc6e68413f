pub mod health;
pub mod records;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ingest::handlers as ingest_handlers;
use crate::matching::handlers as match_handlers;
use crate::questions;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Corpus API
        .route("/api/v1/resumes", get(records::handle_list_resumes))
        .route("/api/v1/jobs", get(records::handle_list_jobs))
        .route(
            "/api/v1/records/:id",
            get(records::handle_get_record).delete(records::handle_delete_record),
        )
        .route(
            "/api/v1/ingest/refresh",
            post(ingest_handlers::handle_refresh),
        )
        // Matching API
        .route("/api/v1/match", post(match_handlers::handle_match))
        .route("/api/v1/analysis", post(match_handlers::handle_analysis))
        // Interview preparation API
        .route(
            "/api/v1/questions",
            post(questions::handle_generate_questions),
        )
        .with_state(state)
}
