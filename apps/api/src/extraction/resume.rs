//! Resume profile extraction — raw text in, persisted `resume` record out.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::embeddings::EmbeddingProvider;
use crate::errors::AppError;
use crate::extraction::prompts::{RESUME_EXTRACT_PROMPT_TEMPLATE, RESUME_EXTRACT_SYSTEM};
use crate::ingest::RawDocument;
use crate::llm_client::{CallOptions, LlmClient};
use crate::models::record::{Record, RecordKind};
use crate::store::RecordStore;

/// Structured profile extracted from raw resume text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedProfile {
    pub name: String,
    pub contact: Contact,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub major: Option<String>,
    pub institution: String,
    pub year: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub duration: Option<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
}

/// Extracts a structured profile from a raw resume document, embeds the
/// full text, and persists the result as a `resume` record.
pub async fn process_resume(
    document: &RawDocument,
    llm: &LlmClient,
    embedder: &dyn EmbeddingProvider,
    store: &dyn RecordStore,
) -> Result<Record, AppError> {
    let prompt = RESUME_EXTRACT_PROMPT_TEMPLATE.replace("{resume_text}", &document.text);
    let profile: ExtractedProfile = llm
        .call_json(&prompt, RESUME_EXTRACT_SYSTEM, &CallOptions::extraction())
        .await
        .map_err(|e| AppError::Llm(format!("resume extraction failed: {e}")))?;

    let embedding = embedder.embed_text(&document.text).await?;

    let record = build_record(profile, embedding, &document.key)?;
    store.put(&record).await?;

    info!(
        "extracted resume record {} from {}",
        record.id, document.key
    );
    Ok(record)
}

fn build_record(
    profile: ExtractedProfile,
    embedding: Vec<f64>,
    source_key: &str,
) -> Result<Record, AppError> {
    let mut record = Record::new(RecordKind::Resume);
    record.embedding = Some(embedding.into_iter().map(Into::into).collect());

    let profile_value = serde_json::to_value(&profile)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("profile serialization failed: {e}")))?;
    if let Value::Object(fields) = profile_value {
        for (key, value) in fields {
            record.set_field(&key, value);
        }
    }

    // Pipeline bookkeeping fields used by the hiring workflow downstream.
    record.set_field("interview_status", json!("no"));
    record.set_field("hired_status", json!("no interview"));
    record.set_field("tags", json!([]));
    record.set_field("interview_summaries", json!([]));
    record.set_field("metadata", json!({ "source": source_key }));

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE_JSON: &str = r#"{
        "name": "John Doe",
        "contact": {
            "email": "john.doe@email.com",
            "phone": "(123) 456-7890",
            "linkedin": null
        },
        "education": [
            {"degree": "MSc", "major": "Computer Science", "institution": "University of Cape Town", "year": "2022"}
        ],
        "experience": [
            {
                "title": "Software Engineer",
                "company": "Google",
                "start_date": "January 2023",
                "end_date": null,
                "duration": null,
                "responsibilities": ["Developed backend APIs", "Worked with PostgreSQL"]
            }
        ],
        "projects": [],
        "skills": ["Python", "Django", "PostgreSQL"]
    }"#;

    #[test]
    fn test_profile_deserializes_from_llm_output() {
        let profile: ExtractedProfile = serde_json::from_str(PROFILE_JSON).unwrap();
        assert_eq!(profile.name, "John Doe");
        assert_eq!(profile.contact.email.as_deref(), Some("john.doe@email.com"));
        assert_eq!(profile.experience[0].company, "Google");
        assert_eq!(profile.skills.len(), 3);
    }

    #[test]
    fn test_profile_tolerates_missing_sections() {
        let json = r#"{"name": "Minimal", "contact": {"email": null, "phone": null, "linkedin": null}}"#;
        let profile: ExtractedProfile = serde_json::from_str(json).unwrap();
        assert!(profile.education.is_empty());
        assert!(profile.skills.is_empty());
    }

    #[test]
    fn test_built_record_carries_profile_and_bookkeeping() {
        let profile: ExtractedProfile = serde_json::from_str(PROFILE_JSON).unwrap();
        let record = build_record(profile, vec![0.1, 0.2], "Data/Resumes/john.pdf").unwrap();

        assert_eq!(record.kind, RecordKind::Resume);
        assert_eq!(record.embedding.as_ref().unwrap().len(), 2);
        assert_eq!(record.field("name").unwrap(), &json!("John Doe"));
        assert_eq!(record.field("interview_status").unwrap(), &json!("no"));
        assert_eq!(record.source_key(), Some("Data/Resumes/john.pdf"));
        assert!(!record.id.is_empty());
    }

    #[test]
    fn test_built_records_get_distinct_ids() {
        let profile: ExtractedProfile = serde_json::from_str(PROFILE_JSON).unwrap();
        let a = build_record(profile.clone(), vec![0.1], "a.pdf").unwrap();
        let b = build_record(profile, vec![0.1], "b.pdf").unwrap();
        assert_ne!(a.id, b.id);
    }
}
