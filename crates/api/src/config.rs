use std::path::PathBuf;

use chrono::Duration;
use motoserwis_core::auth::{parse_duration, AdminAccount};
use motoserwis_core::store::config::{parsed, required};
use motoserwis_core::store::{ConfigError, StoreConfig};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host to bind to.
    pub host: String,
    /// Server port to bind to.
    pub port: u16,
    /// Document store connection settings.
    pub store: StoreConfig,
    /// Directory uploaded images are written to and served from.
    pub images_dir: PathBuf,
    /// Request body limit for uploads, in bytes.
    pub upload_max_bytes: usize,
    /// Public page re-fetch interval; 0 disables the refresh.
    pub public_refresh_secs: u64,
    /// Session token signing secret.
    pub auth_secret: String,
    /// Session token lifetime.
    pub session_ttl: Duration,
    /// Mark the session cookie `Secure`.
    pub secure_cookies: bool,
    /// The single admin account.
    pub admin: AdminAccount,
    /// Log level (e.g., "info", "debug", "trace").
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let ttl_raw = lookup("SESSION_TTL").unwrap_or_else(|| "30d".to_string());
        let session_ttl = parse_duration(&ttl_raw).map_err(move |_| ConfigError::Invalid {
            name: "SESSION_TTL",
            value: ttl_raw,
        })?;

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed(&lookup, "PORT", 3000)?,
            store: StoreConfig::from_lookup(&lookup)?,
            images_dir: lookup("IMAGES_DIR")
                .unwrap_or_else(|| "public/images".to_string())
                .into(),
            upload_max_bytes: parsed(&lookup, "UPLOAD_MAX_BYTES", 10 * 1024 * 1024)?,
            public_refresh_secs: parsed(&lookup, "PUBLIC_REFRESH_SECS", 60)?,
            auth_secret: lookup("AUTH_SECRET")
                .unwrap_or_else(|| "dev-secret-change-me-in-production".to_string()),
            session_ttl,
            secure_cookies: parsed(&lookup, "COOKIE_SECURE", false)?,
            admin: AdminAccount {
                email: required(&lookup, "ADMIN_EMAIL")?,
                name: lookup("ADMIN_NAME").unwrap_or_else(|| "Admin".to_string()),
                password_hash: required(&lookup, "ADMIN_PASSWORD_HASH")?,
            },
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Build the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
