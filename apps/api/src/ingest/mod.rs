//! Document ingestion from object storage.
//!
//! S3 holds the raw corpus: resumes under one prefix, career-path documents
//! under another. The loader turns objects into plain text; the pipeline
//! feeds that text through extraction and into the record store.

pub mod handlers;
pub mod loader;
pub mod pipeline;

/// A raw document pulled from object storage, reduced to plain text.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// The S3 key the document came from; used as its dedup source id.
    pub key: String,
    pub text: String,
}
