use std::sync::Arc;

use motoserwis_core::editor::PageRegistry;
use motoserwis_core::store::ContentStore;
use motoserwis_core::{AssetStore, AuthGate, ContentService};

use crate::config::AppConfig;

/// Shared application state, passed to all handlers via Axum's `State` extractor.
/// Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    config: AppConfig,
    content: ContentService,
    assets: AssetStore,
    auth: AuthGate,
    pages: PageRegistry,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn ContentStore>, pages: PageRegistry) -> Self {
        let assets = AssetStore::new(config.images_dir.clone());
        let auth = AuthGate::new(config.admin.clone(), &config.auth_secret, config.session_ttl);
        Self {
            inner: Arc::new(InnerState {
                content: ContentService::new(store),
                assets,
                auth,
                pages,
                config,
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn content(&self) -> &ContentService {
        &self.inner.content
    }

    pub fn assets(&self) -> &AssetStore {
        &self.inner.assets
    }

    pub fn auth(&self) -> &AuthGate {
        &self.inner.auth
    }

    pub fn pages(&self) -> &PageRegistry {
        &self.inner.pages
    }
}
