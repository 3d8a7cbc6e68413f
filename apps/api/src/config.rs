use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub aws_region: String,
    pub dynamodb_table: String,
    pub s3_bucket: String,
    pub s3_prefix: String,
    pub embedding_model_id: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Default number of matches returned per ranking call.
    pub match_top_n: usize,
    /// Default minimum similarity score for a candidate to appear in results.
    pub similarity_threshold: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            aws_region: std::env::var("AWS_REGION").unwrap_or_else(|_| "eu-central-1".to_string()),
            dynamodb_table: require_env("DYNAMODB_TABLE")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_prefix: std::env::var("S3_PREFIX").unwrap_or_else(|_| "Data".to_string()),
            embedding_model_id: std::env::var("EMBEDDING_MODEL_ID")
                .unwrap_or_else(|_| "amazon.titan-embed-text-v1".to_string()),
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            match_top_n: std::env::var("MATCH_TOP_N")
                .unwrap_or_else(|_| "5".to_string())
                .parse::<usize>()
                .context("MATCH_TOP_N must be a positive integer")?,
            similarity_threshold: std::env::var("SIMILARITY_THRESHOLD")
                .unwrap_or_else(|_| "0.3".to_string())
                .parse::<f64>()
                .context("SIMILARITY_THRESHOLD must be a number")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
