use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::type_key::TypeKey;

/// One editable page or section, stored whole under its type key.
/// Maps to the `content` PostgreSQL table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDocument {
    #[serde(rename = "type")]
    pub type_key: TypeKey,
    /// Page-specific JSON; no schema is enforced by the store.
    pub content: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentDocument {
    /// A freshly inserted document: both timestamps are `now`.
    pub fn new(type_key: TypeKey, content: Value, now: DateTime<Utc>) -> Self {
        Self {
            type_key,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the content wholesale, keeping `created_at`.
    pub fn replace(&mut self, content: Value, now: DateTime<Utc>) {
        self.content = content;
        self.updated_at = now;
    }
}

/// Listing entry for the admin dashboard; omits the content body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSummary {
    #[serde(rename = "type")]
    pub type_key: TypeKey,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ContentDocument> for ContentSummary {
    fn from(doc: &ContentDocument) -> Self {
        Self {
            type_key: doc.type_key.clone(),
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

/// True when a fetched value should be treated as "nothing stored".
pub fn is_empty_content(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
