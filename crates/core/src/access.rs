//! Content Access Layer: read or upsert one document per type key and
//! hand back the JSON verbatim.

use std::sync::Arc;

use serde_json::{json, Value};
use thiserror::Error;

use crate::document::{is_empty_content, ContentDocument, ContentSummary, TypeKey};
use crate::store::{ContentStore, StoreError};

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("content store failure: {0}")]
    Store(#[from] StoreError),
}

/// Where a resolved document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Stored,
    /// Nothing stored yet; the caller's default was used.
    Default,
    /// The read failed; the caller's default was used.
    Fallback,
}

#[derive(Clone)]
pub struct ContentService {
    store: Arc<dyn ContentStore>,
}

impl ContentService {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Stored content for `type_key`, or `{}` when none was ever saved.
    pub async fn get_content(&self, type_key: &TypeKey) -> Result<Value, AccessError> {
        let doc = self.store.find(type_key).await?;
        Ok(doc.map(|d| d.content).unwrap_or_else(|| json!({})))
    }

    /// Upsert `content` under `type_key`. Last write wins.
    pub async fn save_content(
        &self,
        type_key: &TypeKey,
        content: Value,
    ) -> Result<ContentDocument, AccessError> {
        let doc = self.store.upsert(type_key, content).await?;
        tracing::info!(type_key = %type_key, updated_at = %doc.updated_at, "Content saved");
        Ok(doc)
    }

    /// Stored content, or `default` when it is empty or unreadable.
    pub async fn resolve(&self, type_key: &TypeKey, default: &Value) -> (Value, Origin) {
        match self.get_content(type_key).await {
            Ok(content) if !is_empty_content(&content) => (content, Origin::Stored),
            Ok(_) => (default.clone(), Origin::Default),
            Err(err) => {
                tracing::warn!(type_key = %type_key, error = %err, "Content read failed, using defaults");
                (default.clone(), Origin::Fallback)
            }
        }
    }

    pub async fn list(&self) -> Result<Vec<ContentSummary>, AccessError> {
        Ok(self.store.list().await?)
    }

    pub async fn ping(&self) -> Result<(), AccessError> {
        Ok(self.store.ping().await?)
    }
}
