#![allow(dead_code)]

use std::sync::Arc;

use motoserwis_api::{build_app, AppConfig, AppState};
use motoserwis_core::editor::PageRegistry;
use motoserwis_core::store::MemoryContentStore;
use reqwest::redirect::Policy;
use serde_json::{json, Value};
use tempfile::TempDir;

pub const ADMIN_EMAIL: &str = "admin@motoserwis.test";
pub const ADMIN_PASSWORD: &str = "correct horse";

pub struct TestServer {
    pub base: String,
    pub store: Arc<MemoryContentStore>,
    pub images: TempDir,
    pub client: reqwest::Client,
}

/// Start the full app on an ephemeral port with an in-memory store.
pub async fn spawn() -> TestServer {
    spawn_with(&[]).await
}

pub async fn spawn_with(overrides: &[(&str, &str)]) -> TestServer {
    let images = tempfile::tempdir().expect("tempdir");
    let images_dir = images.path().join("public/images");
    let hash = bcrypt::hash(ADMIN_PASSWORD, 4).expect("hash");

    let mut vars: Vec<(String, String)> = vec![
        ("DATABASE_URL".into(), "postgres://unused/postgres".into()),
        ("DATABASE_NAME".into(), "unused".into()),
        ("ADMIN_EMAIL".into(), ADMIN_EMAIL.into()),
        ("ADMIN_NAME".into(), "Workshop Admin".into()),
        ("ADMIN_PASSWORD_HASH".into(), hash),
        ("AUTH_SECRET".into(), "integration-secret".into()),
        ("IMAGES_DIR".into(), images_dir.display().to_string()),
    ];
    vars.extend(overrides.iter().map(|(k, v)| (k.to_string(), v.to_string())));
    let config = AppConfig::from_lookup(move |name| {
        vars.iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    })
    .expect("config");

    let store = Arc::new(MemoryContentStore::new());
    let state = AppState::new(config, store.clone(), PageRegistry::builtin().expect("pages"));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, build_app(state)).await.expect("serve");
    });

    TestServer {
        base: format!("http://{addr}"),
        store,
        images,
        client: reqwest::Client::builder()
            .redirect(Policy::none())
            .build()
            .expect("client"),
    }
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn images_dir(&self) -> std::path::PathBuf {
        self.images.path().join("public/images")
    }

    /// Sign in through the JSON API and return the bearer token.
    pub async fn token(&self) -> String {
        let resp = self
            .client
            .post(self.url("/api/auth/signin"))
            .json(&json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}))
            .send()
            .await
            .expect("signin");
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.expect("json");
        body["token"].as_str().expect("token").to_string()
    }

    /// `Cookie` header value for an authenticated admin.
    pub async fn session_cookie(&self) -> String {
        format!("session={}", self.token().await)
    }
}

/// `{digits}-{suffix}`
pub fn is_stamped(name: &str, suffix: &str) -> bool {
    match name.split_once('-') {
        Some((stamp, rest)) => {
            !stamp.is_empty() && stamp.chars().all(|c| c.is_ascii_digit()) && rest == suffix
        }
        None => false,
    }
}
