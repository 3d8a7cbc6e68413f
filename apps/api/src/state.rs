use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;

use crate::config::Config;
use crate::embeddings::EmbeddingProvider;
use crate::llm_client::LlmClient;
use crate::store::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// External collaborators are carried as trait objects so tests and
/// alternate backends can swap them without touching handler code — never
/// as module-level globals.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub embedder: Arc<dyn EmbeddingProvider>,
    pub s3: S3Client,
    pub llm: LlmClient,
    pub config: Config,
}
