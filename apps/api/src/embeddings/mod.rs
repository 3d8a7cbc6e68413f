//! Embedding provider — the opaque upstream that turns text into vectors.
//!
//! The matching core only assumes that query and candidate vectors come
//! from the same model and share a dimensionality; everything else about
//! embedding generation lives behind this trait.

mod bedrock;

pub use bedrock::TitanEmbedder;

use async_trait::async_trait;

use crate::errors::AppError;

#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds a single text. Fails on empty input.
    async fn embed_text(&self, text: &str) -> Result<Vec<f64>, AppError>;
}
