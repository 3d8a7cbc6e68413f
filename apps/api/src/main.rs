mod config;
mod embeddings;
mod errors;
mod extraction;
mod ingest;
mod llm_client;
mod matching;
mod models;
mod questions;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use aws_config::Region;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::embeddings::TitanEmbedder;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::DynamoStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("matcher_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting matcher API v{}", env!("CARGO_PKG_VERSION"));

    // One shared AWS config for DynamoDB, Bedrock, and S3
    let aws = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.aws_region.clone()))
        .load()
        .await;

    let store = Arc::new(DynamoStore::new(
        aws_sdk_dynamodb::Client::new(&aws),
        config.dynamodb_table.clone(),
    ));
    info!("Record store initialized (table: {})", config.dynamodb_table);

    let embedder = Arc::new(TitanEmbedder::new(
        aws_sdk_bedrockruntime::Client::new(&aws),
        config.embedding_model_id.clone(),
    ));
    info!("Embedder initialized (model: {})", config.embedding_model_id);

    let s3 = aws_sdk_s3::Client::new(&aws);
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::DEFAULT_MODEL);

    let state = AppState {
        store,
        embedder,
        s3,
        llm,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
