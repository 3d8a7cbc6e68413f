//! Record store — persistence for resume and job-description records.
//!
//! The engine treats persistence as an opaque key-value collaborator: the
//! trait below is the whole contract, and `AppState` carries it as
//! `Arc<dyn RecordStore>` so tests can substitute an in-memory double.

mod attr;
mod dynamodb;

pub use dynamodb::DynamoStore;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::record::{Record, RecordKind};

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Writes (or replaces) a record, stamping `last_updated`.
    async fn put(&self, record: &Record) -> Result<(), AppError>;

    async fn get(&self, id: &str) -> Result<Option<Record>, AppError>;

    /// Returns every record of the given kind.
    async fn list(&self, kind: RecordKind) -> Result<Vec<Record>, AppError>;

    async fn delete(&self, id: &str) -> Result<(), AppError>;
}
