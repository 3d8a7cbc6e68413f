//! Corpus refresh pipeline: record store first, S3 + extraction on demand.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::{job::extract_job_levels, resume::process_resume};
use crate::ingest::loader::{fetch_document, list_keys};
use crate::models::record::{Record, RecordKind};
use crate::state::AppState;

/// What one refresh run produced.
#[derive(Debug, Serialize)]
pub struct RefreshSummary {
    pub resumes: usize,
    pub job_levels: usize,
    pub documents_skipped: usize,
    /// True when the store already had a corpus and S3 was not touched.
    pub from_store: bool,
}

/// Ensures the record store holds an extracted corpus.
///
/// Without `force_refresh`, an already-populated store is returned as-is.
/// Otherwise the S3 prefixes are walked and every document not yet in the
/// store is extracted, embedded, and persisted. Per-document failures are
/// logged and counted, never fatal.
pub async fn refresh_corpus(
    state: &AppState,
    force_refresh: bool,
) -> Result<RefreshSummary, AppError> {
    let resumes = state.store.list(RecordKind::Resume).await?;
    let jobs = state.store.list(RecordKind::JobDescription).await?;

    if !force_refresh && !resumes.is_empty() && !jobs.is_empty() {
        info!(
            "corpus already extracted ({} resumes, {} job levels)",
            resumes.len(),
            jobs.len()
        );
        return Ok(RefreshSummary {
            resumes: resumes.len(),
            job_levels: jobs.len(),
            documents_skipped: 0,
            from_store: true,
        });
    }

    let known = known_sources(resumes.iter().chain(jobs.iter()));
    let bucket = &state.config.s3_bucket;

    let mut summary = RefreshSummary {
        resumes: resumes.len(),
        job_levels: jobs.len(),
        documents_skipped: 0,
        from_store: false,
    };

    let resume_prefix = join_prefix(&state.config.s3_prefix, "Resumes/");
    for key in list_keys(&state.s3, bucket, &resume_prefix).await? {
        if known.contains(key.as_str()) {
            continue;
        }
        let document = match fetch_document(&state.s3, bucket, &key).await {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                summary.documents_skipped += 1;
                continue;
            }
            Err(e) => {
                warn!("skipping {key}: {e}");
                summary.documents_skipped += 1;
                continue;
            }
        };
        match process_resume(
            &document,
            &state.llm,
            state.embedder.as_ref(),
            state.store.as_ref(),
        )
        .await
        {
            Ok(_) => summary.resumes += 1,
            Err(e) => {
                warn!("failed to process resume {key}: {e}");
                summary.documents_skipped += 1;
            }
        }
    }

    let jobs_prefix = join_prefix(&state.config.s3_prefix, "Career Path/");
    for key in list_keys(&state.s3, bucket, &jobs_prefix).await? {
        if known.contains(key.as_str()) {
            continue;
        }
        let document = match fetch_document(&state.s3, bucket, &key).await {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                summary.documents_skipped += 1;
                continue;
            }
            Err(e) => {
                warn!("skipping {key}: {e}");
                summary.documents_skipped += 1;
                continue;
            }
        };
        match extract_job_levels(
            &document,
            &state.llm,
            state.embedder.as_ref(),
            state.store.as_ref(),
        )
        .await
        {
            Ok(levels) => summary.job_levels += levels.len(),
            Err(e) => {
                warn!("failed to process career path {key}: {e}");
                summary.documents_skipped += 1;
            }
        }
    }

    info!(
        "refresh complete: {} resumes, {} job levels, {} skipped",
        summary.resumes, summary.job_levels, summary.documents_skipped
    );
    Ok(summary)
}

/// Source keys of records already extracted, so a refresh never re-runs
/// the LLM over a document it has seen.
fn known_sources<'a>(records: impl Iterator<Item = &'a Record>) -> HashSet<String> {
    records
        .filter_map(|r| r.source_key().map(str::to_string))
        .collect()
}

fn join_prefix(base: &str, folder: &str) -> String {
    format!("{}/{folder}", base.trim_end_matches('/'))
}
