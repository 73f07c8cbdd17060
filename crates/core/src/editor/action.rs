use std::str::FromStr;

use thiserror::Error;

use super::schema::PageSchema;
use super::session::EditorSession;
use crate::document::{FieldPath, PathError};

/// One structural editor action, encoded as `verb[:path[:n[:m]]]` so it
/// can travel as the value of a form button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    /// Keep the posted field values without persisting.
    Update,
    Save,
    Append(FieldPath),
    Remove(FieldPath, usize),
    Move(FieldPath, usize, usize),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("unknown action {0:?}")]
    Unknown(String),
    #[error("action {0:?} is missing arguments")]
    MissingArgs(String),
    #[error("invalid index {0:?}")]
    BadIndex(String),
    #[error(transparent)]
    Path(#[from] PathError),
}

impl FromStr for EditAction {
    type Err = ActionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = raw.split(':').collect();
        let index = |s: &str| s.parse::<usize>().map_err(|_| ActionError::BadIndex(s.to_string()));
        match parts.as_slice() {
            ["update"] => Ok(Self::Update),
            ["save"] => Ok(Self::Save),
            ["append", path] => Ok(Self::Append(FieldPath::parse(path)?)),
            ["remove", path, i] => Ok(Self::Remove(FieldPath::parse(path)?, index(*i)?)),
            ["move", path, from, to] => Ok(Self::Move(
                FieldPath::parse(path)?,
                index(*from)?,
                index(*to)?,
            )),
            ["append" | "remove" | "move", ..] => Err(ActionError::MissingArgs(raw.to_string())),
            _ => Err(ActionError::Unknown(raw.to_string())),
        }
    }
}

impl std::fmt::Display for EditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Update => write!(f, "update"),
            Self::Save => write!(f, "save"),
            Self::Append(path) => write!(f, "append:{path}"),
            Self::Remove(path, i) => write!(f, "remove:{path}:{i}"),
            Self::Move(path, from, to) => write!(f, "move:{path}:{from}:{to}"),
        }
    }
}

impl EditAction {
    /// Apply a local (non-persisting) action. Appends use the schema's
    /// template for the list, or an empty string for undeclared lists.
    /// Returns whether the document changed. `Save` is left to the caller.
    pub fn apply_local(&self, session: &mut EditorSession, schema: &PageSchema) -> bool {
        match self {
            Self::Update | Self::Save => false,
            Self::Append(path) => {
                let template = schema
                    .list_template(path)
                    .cloned()
                    .unwrap_or_else(|| serde_json::Value::String(String::new()));
                session.append_item(path, template)
            }
            Self::Remove(path, index) => session.remove_item(path, *index),
            Self::Move(path, from, to) => session.move_item(path, *from, *to),
        }
    }
}
