/// Type key parsing.
///
/// A type key names one content document, e.g. `home` or
/// `services-serwis`. Keys are lowercase ASCII letters, digits and
/// hyphens, and never start or end with a hyphen.
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

const MAX_LEN: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeKeyError {
    #[error("type key cannot be empty")]
    Empty,
    #[error("type key is longer than {MAX_LEN} characters")]
    TooLong,
    #[error("type key contains invalid character {0:?}")]
    InvalidChar(char),
    #[error("type key cannot start or end with '-'")]
    EdgeHyphen,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(String);

impl TypeKey {
    pub fn parse(raw: &str) -> Result<Self, TypeKeyError> {
        if raw.is_empty() {
            return Err(TypeKeyError::Empty);
        }
        if raw.len() > MAX_LEN {
            return Err(TypeKeyError::TooLong);
        }
        if let Some(c) = raw
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(TypeKeyError::InvalidChar(c));
        }
        if raw.starts_with('-') || raw.ends_with('-') {
            return Err(TypeKeyError::EdgeHyphen);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for TypeKey {
    type Err = TypeKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TypeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TypeKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
