//! Amazon Bedrock Titan text-embeddings client.

use async_trait::async_trait;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::embeddings::EmbeddingProvider;
use crate::errors::AppError;

#[derive(Debug, Serialize)]
struct TitanRequest<'a> {
    #[serde(rename = "inputText")]
    input_text: &'a str,
}

#[derive(Debug, Deserialize)]
struct TitanResponse {
    embedding: Vec<f64>,
}

pub struct TitanEmbedder {
    client: Client,
    model_id: String,
}

impl TitanEmbedder {
    pub fn new(client: Client, model_id: String) -> Self {
        Self { client, model_id }
    }
}

#[async_trait]
impl EmbeddingProvider for TitanEmbedder {
    async fn embed_text(&self, text: &str) -> Result<Vec<f64>, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "cannot embed empty text".to_string(),
            ));
        }

        let body = serde_json::to_vec(&TitanRequest { input_text: text })
            .map_err(|e| AppError::Embedding(format!("request serialization failed: {e}")))?;

        let response = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| AppError::Embedding(format!("invoke_model failed: {e}")))?;

        let parsed: TitanResponse = serde_json::from_slice(response.body().as_ref())
            .map_err(|e| AppError::Embedding(format!("unexpected Titan response: {e}")))?;

        debug!(
            "embedded {} chars into {} dimensions",
            text.len(),
            parsed.embedding.len()
        );
        Ok(parsed.embedding)
    }
}
