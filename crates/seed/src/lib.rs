//! Seed the content store with each page's default document.
//!
//! Every run overwrites whatever is stored for the seeded pages.

use std::process::ExitCode;

use motoserwis_core::document::TypeKeyError;
use motoserwis_core::editor::{PageRegistry, SchemaError};
use motoserwis_core::store::{ContentStore, PgContentStore, StoreConfig, StoreError};
use motoserwis_core::TypeKey;
use serde_json::Value;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Pages written by `init-content`.
pub const CONTENT_PAGES: &[&str] = &["home", "about", "services-serwis", "pricing-transport"];

/// Pages written by `init-contact`.
pub const CONTACT_PAGES: &[&str] = &["contact"];

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("invalid page key: {0}")]
    TypeKey(#[from] TypeKeyError),
    #[error("page schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error("no default document registered for {0}")]
    UnknownPage(String),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Resolve each key to its registered default, in order.
pub fn seed_documents(
    registry: &PageRegistry,
    keys: &[&str],
) -> Result<Vec<(TypeKey, Value)>, SeedError> {
    keys.iter()
        .map(|raw| {
            let key = TypeKey::parse(raw)?;
            let schema = registry
                .get(&key)
                .ok_or_else(|| SeedError::UnknownPage(raw.to_string()))?;
            Ok((key, schema.default_document.clone()))
        })
        .collect()
}

/// Upsert documents one at a time, stopping at the first failure.
pub async fn write_documents(
    store: &dyn ContentStore,
    documents: Vec<(TypeKey, Value)>,
) -> Result<usize, SeedError> {
    let mut written = 0;
    for (key, content) in documents {
        store.upsert(&key, content).await?;
        tracing::info!(type_key = %key, "Seeded page content");
        written += 1;
    }
    Ok(written)
}

async fn seed(config: &StoreConfig, keys: &[&str]) -> Result<usize, SeedError> {
    let documents = seed_documents(&PageRegistry::builtin()?, keys)?;
    let store = PgContentStore::connect(config).await?;
    store.migrate().await?;
    write_documents(&store, documents).await
}

/// Fallback filter when `RUST_LOG` is unset.
fn log_level<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string())
}

/// Entry point shared by the seed binaries.
pub async fn run(name: &str, keys: &[&str]) -> ExitCode {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_level(|name| std::env::var(name).ok()))),
        )
        .json()
        .init();

    let config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(script = name, "Missing database configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    match seed(&config, keys).await {
        Ok(count) => {
            tracing::info!(script = name, count, "Seeding finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(script = name, "Seeding failed: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motoserwis_core::store::MemoryContentStore;
    use serde_json::json;

    #[test]
    fn seed_sets_cover_every_registered_page_once() {
        let registry = PageRegistry::builtin().unwrap();
        let mut all: Vec<&str> = CONTENT_PAGES.iter().chain(CONTACT_PAGES).copied().collect();
        all.sort();
        let mut registered: Vec<&str> = registry.pages().iter().map(|p| p.type_key.as_str()).collect();
        registered.sort();
        assert_eq!(all, registered);
    }

    #[test]
    fn log_level_reads_env_with_info_default() {
        assert_eq!(log_level(|_| None), "info");
        assert_eq!(
            log_level(|name| (name == "LOG_LEVEL").then(|| "debug".to_string())),
            "debug"
        );
    }

    #[test]
    fn unknown_page_is_an_error() {
        let registry = PageRegistry::builtin().unwrap();
        let err = seed_documents(&registry, &["home", "blog"]).unwrap_err();
        assert!(matches!(err, SeedError::UnknownPage(ref p) if p == "blog"));
    }

    #[tokio::test]
    async fn writes_defaults_and_overwrites_existing() {
        let registry = PageRegistry::builtin().unwrap();
        let store = MemoryContentStore::new();
        let home = TypeKey::parse("home").unwrap();
        store.upsert(&home, json!({"stale": true})).await.unwrap();

        let docs = seed_documents(&registry, CONTENT_PAGES).unwrap();
        let written = write_documents(&store, docs).await.unwrap();
        assert_eq!(written, 4);

        let stored = store.find(&home).await.unwrap().unwrap();
        assert_eq!(stored.content, registry.default_for(&home));
        assert!(store
            .find(&TypeKey::parse("contact").unwrap())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn store_failure_stops_seeding() {
        let registry = PageRegistry::builtin().unwrap();
        let store = MemoryContentStore::new();
        store.set_offline(true);
        let docs = seed_documents(&registry, CONTACT_PAGES).unwrap();
        let err = write_documents(&store, docs).await.unwrap_err();
        assert!(matches!(err, SeedError::Store(_)));
    }
}
