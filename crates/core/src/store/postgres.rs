use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use super::{config::StoreConfig, ContentStore, StoreError};
use crate::document::{ContentDocument, ContentSummary, TypeKey};

/// PostgreSQL-backed store over the `content` table.
#[derive(Debug, Clone)]
pub struct PgContentStore {
    pool: PgPool,
}

impl PgContentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool using the given connection settings.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_with(config.connect_options()?)
            .await?;
        tracing::info!(database = %config.database_name, "Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Apply the embedded migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        tracing::info!("Database migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn document_from_row(row: &PgRow) -> Result<ContentDocument, StoreError> {
    let raw_type: String = row.try_get("type")?;
    let type_key =
        TypeKey::parse(&raw_type).map_err(|e| StoreError::CorruptRow(format!("{raw_type}: {e}")))?;
    Ok(ContentDocument {
        type_key,
        content: row.try_get::<Value, _>("content")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn find(&self, type_key: &TypeKey) -> Result<Option<ContentDocument>, StoreError> {
        let row = sqlx::query(
            "SELECT type, content, created_at, updated_at FROM content WHERE type = $1",
        )
        .bind(type_key.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(document_from_row).transpose()
    }

    async fn upsert(
        &self,
        type_key: &TypeKey,
        content: Value,
    ) -> Result<ContentDocument, StoreError> {
        let row = sqlx::query(
            "INSERT INTO content (type, content, created_at, updated_at)
             VALUES ($1, $2, now(), now())
             ON CONFLICT (type)
             DO UPDATE SET content = EXCLUDED.content, updated_at = now()
             RETURNING type, content, created_at, updated_at",
        )
        .bind(type_key.as_str())
        .bind(&content)
        .fetch_one(&self.pool)
        .await?;

        document_from_row(&row)
    }

    async fn list(&self) -> Result<Vec<ContentSummary>, StoreError> {
        let rows = sqlx::query("SELECT type, created_at, updated_at FROM content ORDER BY type")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| {
                let raw_type: String = row.try_get("type")?;
                let type_key = TypeKey::parse(&raw_type)
                    .map_err(|e| StoreError::CorruptRow(format!("{raw_type}: {e}")))?;
                Ok(ContentSummary {
                    type_key,
                    created_at: row.try_get("created_at")?,
                    updated_at: row.try_get("updated_at")?,
                })
            })
            .collect()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
