use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One step into a JSON tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// An object key.
    Key(String),
    /// An array index.
    Index(usize),
}

/// Address of a value inside a content document, e.g. `services[2].price`.
/// The empty path addresses the document root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

/// Path parse error.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PathError {
    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedChar(char, usize),
    #[error("empty segment at position {0}")]
    EmptySegment(usize),
    #[error("unterminated index starting at position {0}")]
    UnterminatedIndex(usize),
    #[error("invalid index '{0}'")]
    InvalidIndex(String),
}

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse `a.b[0].c`. Keys are `[A-Za-z0-9_-]+`.
    pub fn parse(input: &str) -> Result<Self, PathError> {
        let chars: Vec<char> = input.chars().collect();
        let mut segments = Vec::new();
        let mut pos = 0;

        if chars.is_empty() {
            return Ok(Self::root());
        }

        loop {
            // Key
            let start = pos;
            while pos < chars.len() && is_key_char(chars[pos]) {
                pos += 1;
            }
            if pos == start {
                return match chars.get(pos) {
                    Some('.') | None => Err(PathError::EmptySegment(pos)),
                    Some(&c) => Err(PathError::UnexpectedChar(c, pos)),
                };
            }
            segments.push(Segment::Key(chars[start..pos].iter().collect()));

            // Indexes
            while pos < chars.len() && chars[pos] == '[' {
                let open = pos;
                pos += 1;
                let digits_start = pos;
                while pos < chars.len() && chars[pos] != ']' {
                    pos += 1;
                }
                if pos >= chars.len() {
                    return Err(PathError::UnterminatedIndex(open));
                }
                let digits: String = chars[digits_start..pos].iter().collect();
                let index = if digits.chars().all(|c| c.is_ascii_digit()) {
                    digits.parse::<usize>().ok()
                } else {
                    None
                };
                match index {
                    Some(i) => segments.push(Segment::Index(i)),
                    None => return Err(PathError::InvalidIndex(digits)),
                }
                pos += 1; // skip ']'
            }

            match chars.get(pos) {
                None => break,
                Some('.') => pos += 1,
                Some(&c) => return Err(PathError::UnexpectedChar(c, pos)),
            }
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a key segment.
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.segments.push(Segment::Key(key.into()));
        next
    }

    /// Append an index segment.
    pub fn index(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.segments.push(Segment::Index(index));
        next
    }

    /// Concatenate a relative path onto this one.
    pub fn join(&self, rel: &FieldPath) -> Self {
        let mut next = self.clone();
        next.segments.extend(rel.segments.iter().cloned());
        next
    }
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(k) if i == 0 => write!(f, "{k}")?,
                Segment::Key(k) => write!(f, ".{k}")?,
                Segment::Index(n) => write!(f, "[{n}]")?,
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
