//! Conversion between `serde_json::Value` documents and DynamoDB items.
//!
//! DynamoDB has no float type — every number is an arbitrary-precision
//! decimal carried as a string (`N`). Writing converts JSON numbers to
//! their decimal form; reading keeps non-integer `N` values as decimal
//! strings rather than round-tripping them through `f64`, which is exactly
//! the mixed representation the matching core is built to coerce.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Map, Number, Value};

use crate::errors::AppError;
use crate::models::record::Record;

/// Converts a full record to a DynamoDB item.
pub fn record_to_item(record: &Record) -> Result<HashMap<String, AttributeValue>, AppError> {
    let value = serde_json::to_value(record)
        .map_err(|e| AppError::Store(format!("failed to serialize record {}: {e}", record.id)))?;

    match value {
        Value::Object(map) => Ok(map
            .iter()
            .map(|(k, v)| (k.clone(), value_to_attr(v)))
            .collect()),
        _ => Err(AppError::Store(format!(
            "record {} did not serialize to an object",
            record.id
        ))),
    }
}

/// Converts a DynamoDB item back into a record.
pub fn item_to_record(item: &HashMap<String, AttributeValue>) -> Result<Record, AppError> {
    let mut map = Map::new();
    for (key, attr) in item {
        map.insert(key.clone(), attr_to_value(attr));
    }
    serde_json::from_value(Value::Object(map))
        .map_err(|e| AppError::Store(format!("malformed item in record store: {e}")))
}

pub fn value_to_attr(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(value_to_attr).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(k, v)| (k.clone(), value_to_attr(v)))
                .collect(),
        ),
    }
}

pub fn attr_to_value(attr: &AttributeValue) -> Value {
    match attr {
        AttributeValue::S(s) => Value::String(s.clone()),
        // Integers convert exactly; anything else stays a decimal string so
        // no precision is lost to an f64 round-trip.
        AttributeValue::N(n) => match n.parse::<i64>() {
            Ok(i) => Value::Number(Number::from(i)),
            Err(_) => Value::String(n.clone()),
        },
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(items) => Value::Array(items.iter().map(attr_to_value).collect()),
        AttributeValue::M(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), attr_to_value(v)))
                .collect(),
        ),
        AttributeValue::Ss(items) => {
            Value::Array(items.iter().cloned().map(Value::String).collect())
        }
        // Binary and number-set attributes never appear in our documents.
        _ => Value::Null,
    }
}
