//! DynamoDB-backed record store.
//!
//! Single-table layout: resumes and job-description levels share one table,
//! keyed by `id`, discriminated by the `type` attribute.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use chrono::Utc;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::models::record::{Record, RecordKind};
use crate::store::attr::{item_to_record, record_to_item};
use crate::store::RecordStore;

pub struct DynamoStore {
    client: Client,
    table: String,
}

impl DynamoStore {
    pub fn new(client: Client, table: String) -> Self {
        Self { client, table }
    }
}

#[async_trait]
impl RecordStore for DynamoStore {
    async fn put(&self, record: &Record) -> Result<(), AppError> {
        let mut item = record_to_item(record)?;
        item.insert(
            "last_updated".to_string(),
            AttributeValue::S(Utc::now().to_rfc3339()),
        );

        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| AppError::Store(format!("put_item failed for {}: {e}", record.id)))?;

        debug!("saved {} record {}", record.kind.as_str(), record.id);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Record>, AppError> {
        let response = self
            .client
            .get_item()
            .table_name(&self.table)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| AppError::Store(format!("get_item failed for {id}: {e}")))?;

        response.item().map(item_to_record).transpose()
    }

    async fn list(&self, kind: RecordKind) -> Result<Vec<Record>, AppError> {
        let mut records = Vec::new();
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;

        loop {
            let mut request = self
                .client
                .scan()
                .table_name(&self.table)
                .filter_expression("#t = :kind")
                .expression_attribute_names("#t", "type")
                .expression_attribute_values(
                    ":kind",
                    AttributeValue::S(kind.as_str().to_string()),
                );
            if let Some(key) = start_key.take() {
                request = request.set_exclusive_start_key(Some(key));
            }

            let response = request
                .send()
                .await
                .map_err(|e| AppError::Store(format!("scan failed: {e}")))?;

            for item in response.items() {
                // One corrupt item must not hide the rest of the corpus.
                match item_to_record(item) {
                    Ok(record) => records.push(record),
                    Err(e) => warn!("skipping unreadable item: {e}"),
                }
            }

            match response.last_evaluated_key() {
                Some(key) if !key.is_empty() => start_key = Some(key.clone()),
                _ => break,
            }
        }

        debug!("loaded {} {} records", records.len(), kind.as_str());
        Ok(records)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.client
            .delete_item()
            .table_name(&self.table)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| AppError::Store(format!("delete_item failed for {id}: {e}")))?;
        Ok(())
    }
}
