#![allow(dead_code)]

//! Record envelope — the shape every stored document shares.
//!
//! Resumes and job-description levels carry wildly different fields, so the
//! envelope types only what every record must have (`id`, `type`,
//! `embedding`) and passes everything else through opaquely in `fields`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Discriminator stored under the `type` field of every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    #[serde(rename = "resume")]
    Resume,
    #[serde(rename = "job_description")]
    JobDescription,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Resume => "resume",
            RecordKind::JobDescription => "job_description",
        }
    }
}

/// One embedding element as supplied upstream.
///
/// Embeddings computed in-process are native floats; embeddings read back
/// from the record store arrive as fixed-point decimal strings (DynamoDB
/// stores all numbers that way). The matching core coerces each element
/// independently, so a single vector may mix both forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingValue {
    Float(f64),
    Decimal(String),
}

impl EmbeddingValue {
    /// Coerces this element to a finite `f64`, or `None` if the decimal
    /// string is not a number (or parses to NaN/infinity).
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            EmbeddingValue::Float(v) => *v,
            EmbeddingValue::Decimal(s) => s.trim().parse::<f64>().ok()?,
        };
        v.is_finite().then_some(v)
    }
}

impl From<f64> for EmbeddingValue {
    fn from(v: f64) -> Self {
        EmbeddingValue::Float(v)
    }
}

/// A stored document: typed core plus an open payload map.
///
/// The ranker only ever reads `embedding`; all other fields (name, contact,
/// skills, experience, level, …) ride along untouched so callers can render
/// the full original document for any match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<EmbeddingValue>>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// Creates an empty record of the given kind with a fresh UUID.
    pub fn new(kind: RecordKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            embedding: None,
            fields: Map::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn set_field(&mut self, name: &str, value: Value) {
        self.fields.insert(name.to_string(), value);
    }

    /// The S3 key this record was extracted from, if it carries one.
    pub fn source_key(&self) -> Option<&str> {
        self.fields
            .get("metadata")?
            .get("source")
            .and_then(Value::as_str)
    }
}
