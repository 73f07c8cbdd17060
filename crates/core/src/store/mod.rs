//! Persistence for content documents.
//!
//! One record per type key, replaced wholesale on every save. Two
//! backends: PostgreSQL for deployments and an in-memory map for tests
//! and local development.

pub mod config;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::document::{ContentDocument, ContentSummary, TypeKey};

pub use config::{ConfigError, StoreConfig};
pub use memory::MemoryContentStore;
pub use postgres::PgContentStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("stored row is invalid: {0}")]
    CorruptRow(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Fetch the document for `type_key`, if one was ever saved.
    async fn find(&self, type_key: &TypeKey) -> Result<Option<ContentDocument>, StoreError>;

    /// Insert or wholesale-replace the document for `type_key`.
    async fn upsert(&self, type_key: &TypeKey, content: Value)
        -> Result<ContentDocument, StoreError>;

    /// All stored documents without their bodies, ordered by type key.
    async fn list(&self) -> Result<Vec<ContentSummary>, StoreError>;

    /// Cheap connectivity check.
    async fn ping(&self) -> Result<(), StoreError>;
}
