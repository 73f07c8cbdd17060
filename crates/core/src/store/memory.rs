use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{ContentStore, StoreError};
use crate::document::{ContentDocument, ContentSummary, TypeKey};

/// Map-backed store. Can be switched offline to exercise failure paths.
#[derive(Debug, Default)]
pub struct MemoryContentStore {
    docs: RwLock<HashMap<TypeKey, ContentDocument>>,
    offline: AtomicBool,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `StoreError::Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("memory store is offline".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn find(&self, type_key: &TypeKey) -> Result<Option<ContentDocument>, StoreError> {
        self.check_online()?;
        Ok(self.docs.read().await.get(type_key).cloned())
    }

    async fn upsert(
        &self,
        type_key: &TypeKey,
        content: Value,
    ) -> Result<ContentDocument, StoreError> {
        self.check_online()?;
        let now = Utc::now();
        let mut docs = self.docs.write().await;
        let doc = match docs.get_mut(type_key) {
            Some(doc) => {
                doc.replace(content, now);
                doc.clone()
            }
            None => {
                let doc = ContentDocument::new(type_key.clone(), content, now);
                docs.insert(type_key.clone(), doc.clone());
                doc
            }
        };
        Ok(doc)
    }

    async fn list(&self) -> Result<Vec<ContentSummary>, StoreError> {
        self.check_online()?;
        let docs = self.docs.read().await;
        let mut summaries: Vec<ContentSummary> = docs.values().map(ContentSummary::from).collect();
        summaries.sort_by(|a, b| a.type_key.cmp(&b.type_key));
        Ok(summaries)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }
}
