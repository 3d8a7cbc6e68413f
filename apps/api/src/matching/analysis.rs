//! Per-pair matching analysis: skills overlap, experience keywords, and a
//! similarity percentage for one (resume, job) pair.
//!
//! Unlike the ranker, which filters a whole corpus, this is a drill-down on
//! a single pairing — every signal degrades gracefully (empty lists, 0.0)
//! instead of failing, so a sparse record still produces a usable report.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;

use crate::matching::cosine_similarity;
use crate::models::record::{EmbeddingValue, Record};

/// How the resume's skill list covers the job's skill list.
#[derive(Debug, Clone, Serialize)]
pub struct SkillsMatch {
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    /// Percentage of job skills present in the resume, two decimal places.
    pub overlap_percentage: f64,
}

/// Full analysis for one (resume, job) pair.
#[derive(Debug, Clone, Serialize)]
pub struct MatchAnalysis {
    pub skills_match: SkillsMatch,
    /// Job-description keywords found in the resume's experience entries.
    pub experience_keywords_match: Vec<String>,
    /// Embedding similarity as a percentage, 0.0 when unavailable.
    pub semantic_similarity_score: f64,
}

/// Analyzes one resume against one job record.
pub fn analyze_pair(resume: &Record, job: &Record) -> MatchAnalysis {
    let skills_match = match_skills(&string_list(resume, "skills"), &string_list(job, "skills"));

    let job_text = job
        .field("full_text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_lowercase();
    let experience_keywords_match = match_experience_keywords(resume, &job_text);

    let semantic_similarity_score =
        match (resume.embedding.as_deref(), job.embedding.as_deref()) {
            (Some(a), Some(b)) => similarity_percent(a, b),
            _ => 0.0,
        };

    MatchAnalysis {
        skills_match,
        experience_keywords_match,
        semantic_similarity_score,
    }
}

/// Case-insensitive set comparison of resume skills against job skills.
///
/// An empty job skill list yields empty results rather than a vacuous 100%.
pub fn match_skills(resume_skills: &[String], job_skills: &[String]) -> SkillsMatch {
    if job_skills.is_empty() {
        return SkillsMatch {
            matched_skills: vec![],
            missing_skills: vec![],
            overlap_percentage: 0.0,
        };
    }

    let resume: BTreeSet<String> = resume_skills.iter().map(|s| s.to_lowercase()).collect();
    let job: BTreeSet<String> = job_skills.iter().map(|s| s.to_lowercase()).collect();

    let matched_skills: Vec<String> = job.intersection(&resume).cloned().collect();
    let missing_skills: Vec<String> = job.difference(&resume).cloned().collect();
    let overlap_percentage = round2(matched_skills.len() as f64 / job.len() as f64 * 100.0);

    SkillsMatch {
        matched_skills,
        missing_skills,
        overlap_percentage,
    }
}

/// Job-text keywords (alphanumeric, longer than two characters) that appear
/// in the resume's experience entries, deduplicated and sorted.
fn match_experience_keywords(resume: &Record, job_text: &str) -> Vec<String> {
    if job_text.is_empty() {
        return vec![];
    }

    let experience_text = experience_text(resume);
    job_text
        .split_whitespace()
        .filter(|w| w.chars().count() > 2 && w.chars().all(char::is_alphanumeric))
        .filter(|w| experience_text.contains(*w))
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Lowercased concatenation of every experience entry's title, company, and
/// responsibilities.
fn experience_text(resume: &Record) -> String {
    let mut text = String::new();
    let entries = resume
        .field("experience")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for entry in entries {
        for part in ["title", "company"] {
            if let Some(s) = entry.get(part).and_then(Value::as_str) {
                text.push_str(s);
                text.push(' ');
            }
        }
        if let Some(items) = entry.get("responsibilities").and_then(Value::as_array) {
            for item in items {
                if let Some(s) = item.as_str() {
                    text.push_str(s);
                    text.push(' ');
                }
            }
        }
    }
    text.to_lowercase()
}

/// Cosine similarity as a percentage; unusable embeddings score 0.0 here
/// instead of erroring, since the analysis reports on whatever is present.
fn similarity_percent(a: &[EmbeddingValue], b: &[EmbeddingValue]) -> f64 {
    match cosine_similarity(a, b) {
        Ok(score) => round2(score * 100.0),
        Err(_) => 0.0,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn string_list(record: &Record, field: &str) -> Vec<String> {
    record
        .field(field)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
