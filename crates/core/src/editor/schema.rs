use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::document::{FieldPath, PathError, Segment, TypeKey, TypeKeyError};

/// How a field is edited and displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Widget {
    Text,
    TextArea,
    Image,
    /// Repeatable records. Item field paths are relative to one item.
    List {
        item_fields: Vec<FieldSpec>,
        template: Value,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub label: String,
    pub path: FieldPath,
    pub widget: Widget,
}

impl FieldSpec {
    pub fn new(label: &str, path: &str, widget: Widget) -> Result<Self, PathError> {
        Ok(Self {
            label: label.to_string(),
            path: FieldPath::parse(path)?,
            widget,
        })
    }

    pub fn text(label: &str, path: &str) -> Result<Self, PathError> {
        Self::new(label, path, Widget::Text)
    }

    pub fn textarea(label: &str, path: &str) -> Result<Self, PathError> {
        Self::new(label, path, Widget::TextArea)
    }

    pub fn image(label: &str, path: &str) -> Result<Self, PathError> {
        Self::new(label, path, Widget::Image)
    }

    pub fn list(
        label: &str,
        path: &str,
        item_fields: Vec<FieldSpec>,
        template: Value,
    ) -> Result<Self, PathError> {
        Self::new(
            label,
            path,
            Widget::List {
                item_fields,
                template,
            },
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldGroup {
    pub label: String,
    pub fields: Vec<FieldSpec>,
}

impl FieldGroup {
    pub fn new(label: &str, fields: Vec<FieldSpec>) -> Self {
        Self {
            label: label.to_string(),
            fields,
        }
    }
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    TypeKey(#[from] TypeKeyError),
}

/// Declaration of one editable page: its key, title, field groups and
/// the default document used whenever nothing is stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSchema {
    pub type_key: TypeKey,
    pub title: String,
    pub default_document: Value,
    pub groups: Vec<FieldGroup>,
}

impl PageSchema {
    pub fn new(
        type_key: &str,
        title: &str,
        default_document: Value,
        groups: Vec<FieldGroup>,
    ) -> Result<Self, SchemaError> {
        Ok(Self {
            type_key: TypeKey::parse(type_key)?,
            title: title.to_string(),
            default_document,
            groups,
        })
    }

    /// Item template for the list addressed by a concrete `path`, which
    /// may pass through indexes of enclosing lists (`categories[1].rows`).
    pub fn list_template(&self, path: &FieldPath) -> Option<&Value> {
        self.groups
            .iter()
            .flat_map(|g| g.fields.iter())
            .find_map(|field| match_list(field, path.segments()))
    }
}

fn match_list<'a>(field: &'a FieldSpec, target: &[Segment]) -> Option<&'a Value> {
    let Widget::List {
        item_fields,
        template,
    } = &field.widget
    else {
        return None;
    };
    let rest = target.strip_prefix(field.path.segments())?;
    match rest {
        [] => Some(template),
        [Segment::Index(_), inner @ ..] => item_fields.iter().find_map(|f| match_list(f, inner)),
        _ => None,
    }
}
