use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

use super::StoreError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Connection settings for the document store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub database_url: String,
    pub database_name: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl StoreConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            database_url: required(&lookup, "DATABASE_URL")?,
            database_name: required(&lookup, "DATABASE_NAME")?,
            max_connections: parsed(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            min_connections: parsed(&lookup, "DB_MIN_CONNECTIONS", 1)?,
        })
    }

    /// Connection options for the URL with the configured database selected.
    pub fn connect_options(&self) -> Result<PgConnectOptions, StoreError> {
        let options = PgConnectOptions::from_str(&self.database_url)?;
        Ok(options.database(&self.database_name))
    }
}

/// Read a non-empty variable or fail.
pub fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(name)),
    }
}

/// Parse a variable, falling back to `default` when unset.
pub fn parsed<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
    }
}
