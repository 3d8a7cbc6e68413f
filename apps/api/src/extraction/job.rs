//! Career-level extraction — one `job_description` record per level found
//! in a career-path document.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::embeddings::EmbeddingProvider;
use crate::errors::AppError;
use crate::extraction::prompts::{JOB_LEVELS_PROMPT_TEMPLATE, JOB_LEVELS_SYSTEM};
use crate::ingest::RawDocument;
use crate::llm_client::{CallOptions, LlmClient};
use crate::models::record::{Record, RecordKind};
use crate::store::RecordStore;

/// How much of the source document each job record keeps for display.
const FULL_TEXT_CHARS: usize = 500;

/// One career level extracted from a career-path document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerLevel {
    pub level: String,
    pub title: String,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub focus: Option<String>,
    #[serde(default)]
    pub core_requirements: Vec<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    #[serde(default)]
    pub technologies_mentioned: Vec<String>,
}

impl CareerLevel {
    /// Builds the text that gets embedded for this level. The embedding
    /// must capture the level's own requirements, not the whole document,
    /// so each level gets its own vector.
    pub fn embedding_text(&self) -> String {
        format!(
            "Title: {}\nLevel: {}\nExperience: {}\nFocus: {}\nRequirements: {}\nSkills: {}\nTechnologies: {}",
            self.title,
            self.level,
            self.experience.as_deref().unwrap_or(""),
            self.focus.as_deref().unwrap_or(""),
            self.core_requirements.join(", "),
            self.soft_skills.join(", "),
            self.technologies_mentioned.join(", "),
        )
    }
}

/// Extracts every career level from a document, embeds each level
/// separately, and persists one `job_description` record per level.
///
/// A failure saving one level is logged and does not stop the others.
pub async fn extract_job_levels(
    document: &RawDocument,
    llm: &LlmClient,
    embedder: &dyn EmbeddingProvider,
    store: &dyn RecordStore,
) -> Result<Vec<Record>, AppError> {
    let prompt = JOB_LEVELS_PROMPT_TEMPLATE.replace("{document_text}", &document.text);
    let levels: Vec<CareerLevel> = llm
        .call_json(&prompt, JOB_LEVELS_SYSTEM, &CallOptions::extraction())
        .await
        .map_err(|e| AppError::Llm(format!("job level extraction failed: {e}")))?;

    if levels.is_empty() {
        warn!("no career levels found in {}", document.key);
        return Ok(vec![]);
    }

    let mut saved = Vec::new();
    for level in levels {
        let embedding = match embedder.embed_text(&level.embedding_text()).await {
            Ok(e) => e,
            Err(e) => {
                warn!(
                    "skipping level '{}' from {}: {e}",
                    level.level, document.key
                );
                continue;
            }
        };

        let record = build_record(level, embedding, document)?;
        match store.put(&record).await {
            Ok(()) => saved.push(record),
            Err(e) => warn!("failed to save level record from {}: {e}", document.key),
        }
    }

    info!(
        "extracted {} job level record(s) from {}",
        saved.len(),
        document.key
    );
    Ok(saved)
}

fn build_record(
    level: CareerLevel,
    embedding: Vec<f64>,
    document: &RawDocument,
) -> Result<Record, AppError> {
    let mut record = Record::new(RecordKind::JobDescription);
    record.embedding = Some(embedding.into_iter().map(Into::into).collect());

    let level_value = serde_json::to_value(&level)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("level serialization failed: {e}")))?;
    if let Value::Object(fields) = level_value {
        for (key, value) in fields {
            record.set_field(&key, value);
        }
    }

    record.set_field("full_text", json!(excerpt(&document.text, FULL_TEXT_CHARS)));
    record.set_field("metadata", json!({ "source": document.key }));

    Ok(record)
}

/// First `max_chars` characters of `text`, with an ellipsis when truncated.
fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push('…');
    out
}
