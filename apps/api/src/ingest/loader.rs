//! S3 listing, download, and text extraction.

use aws_sdk_s3::Client as S3Client;
use tracing::warn;

use crate::errors::AppError;
use crate::ingest::RawDocument;

/// Lists every object key under a prefix, skipping folder placeholders.
pub async fn list_keys(s3: &S3Client, bucket: &str, prefix: &str) -> Result<Vec<String>, AppError> {
    let mut keys = Vec::new();
    let mut pages = s3
        .list_objects_v2()
        .bucket(bucket)
        .prefix(prefix)
        .into_paginator()
        .send();

    while let Some(page) = pages.next().await {
        let page = page.map_err(|e| AppError::S3(format!("list_objects_v2 failed: {e}")))?;
        for object in page.contents() {
            if let Some(key) = object.key() {
                if !key.ends_with('/') {
                    keys.push(key.to_string());
                }
            }
        }
    }

    Ok(keys)
}

/// Downloads one object and extracts its text.
///
/// Returns `Ok(None)` for unsupported formats and unreadable files — a
/// single bad document is skipped, never fatal to the batch.
pub async fn fetch_document(
    s3: &S3Client,
    bucket: &str,
    key: &str,
) -> Result<Option<RawDocument>, AppError> {
    let response = s3
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| AppError::S3(format!("get_object failed for {key}: {e}")))?;

    let bytes = response
        .body
        .collect()
        .await
        .map_err(|e| AppError::S3(format!("failed to read body of {key}: {e}")))?
        .into_bytes();

    match extract_text(key, &bytes) {
        Some(text) if !text.trim().is_empty() => Ok(Some(RawDocument {
            key: key.to_string(),
            text,
        })),
        _ => Ok(None),
    }
}

/// Routes text extraction by file extension.
fn extract_text(key: &str, bytes: &[u8]) -> Option<String> {
    match extension(key).as_deref() {
        Some("pdf") => match pdf_extract::extract_text_from_mem(bytes) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("failed to extract text from {key}: {e}");
                None
            }
        },
        Some("txt") | Some("md") => Some(String::from_utf8_lossy(bytes).into_owned()),
        other => {
            warn!(
                "skipping {key}: unsupported extension {:?}",
                other.unwrap_or("<none>")
            );
            None
        }
    }
}

fn extension(key: &str) -> Option<String> {
    let name = key.rsplit('/').next()?;
    let (stem, ext) = name.rsplit_once('.')?;
    (!stem.is_empty()).then(|| ext.to_ascii_lowercase())
}
