use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::ops;
use crate::access::{AccessError, ContentService, Origin};
use crate::document::{FieldPath, TypeKey};

/// Lifecycle of one editor instance.
///
/// `Loading -> Ready -> (Editing <-> Ready) -> Saving -> (Ready | SaveFailed -> Ready)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditorStatus {
    Loading,
    Ready,
    Editing,
    Saving,
    SaveFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// Transient message for the person editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }
}

/// Editable working copy of one content document.
///
/// The whole session is plain data so it can be carried between
/// requests (the admin form embeds it) and tested without any UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSession {
    type_key: TypeKey,
    document: Value,
    dirty: bool,
    status: EditorStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notice: Option<Notice>,
}

impl EditorSession {
    pub fn new(type_key: TypeKey) -> Self {
        Self {
            type_key,
            document: json!({}),
            dirty: false,
            status: EditorStatus::Loading,
            notice: None,
        }
    }

    /// Create a session and load it in one step.
    pub async fn open(type_key: TypeKey, service: &ContentService, default: &Value) -> Self {
        let mut session = Self::new(type_key);
        session.load(service, default).await;
        session
    }

    /// Fetch the stored document, falling back to `default` when nothing
    /// is stored or the read fails. Always ends `Ready`.
    pub async fn load(&mut self, service: &ContentService, default: &Value) {
        self.status = EditorStatus::Loading;
        let (document, origin) = service.resolve(&self.type_key, default).await;
        self.document = document;
        self.dirty = false;
        self.status = EditorStatus::Ready;
        self.notice = match origin {
            Origin::Stored | Origin::Default => None,
            Origin::Fallback => Some(Notice::new(
                NoticeLevel::Info,
                "Could not load saved content; showing defaults.",
            )),
        };
    }

    /// Write one value at `path`, creating intermediate containers.
    /// Unchanged values and indexes past the end of a list are no-ops.
    pub fn set_field(&mut self, path: &FieldPath, value: Value) -> bool {
        if ops::get_at(&self.document, path) == Some(&value) {
            return false;
        }
        match ops::set_at(&self.document, path, value) {
            Some(next) => self.apply(next),
            None => false,
        }
    }

    /// Push `template` onto the list at `path`.
    pub fn append_item(&mut self, path: &FieldPath, template: Value) -> bool {
        match ops::append_at(&self.document, path, template) {
            Some(next) => self.apply(next),
            None => false,
        }
    }

    /// Remove the element at `index`; out-of-range is a no-op.
    pub fn remove_item(&mut self, path: &FieldPath, index: usize) -> bool {
        match ops::remove_at(&self.document, path, index) {
            Some(next) => self.apply(next),
            None => false,
        }
    }

    /// Move the element at `from` so it ends at `to`; out-of-range is a no-op.
    pub fn move_item(&mut self, path: &FieldPath, from: usize, to: usize) -> bool {
        if from == to {
            return false;
        }
        match ops::move_at(&self.document, path, from, to) {
            Some(next) => self.apply(next),
            None => false,
        }
    }

    /// Persist the full document. On failure the local edits are kept
    /// and the session stays dirty so the save can be retried.
    pub async fn save(&mut self, service: &ContentService) -> Result<(), AccessError> {
        self.status = EditorStatus::Saving;
        match service
            .save_content(&self.type_key, self.document.clone())
            .await
        {
            Ok(saved) => {
                self.document = saved.content;
                self.dirty = false;
                self.status = EditorStatus::Ready;
                self.notice = Some(Notice::new(NoticeLevel::Success, "Changes saved."));
                Ok(())
            }
            Err(err) => {
                tracing::error!(type_key = %self.type_key, error = %err, "Editor save failed");
                self.status = EditorStatus::SaveFailed;
                self.notice = Some(Notice::new(
                    NoticeLevel::Error,
                    "Saving failed. Your changes are still here; try again.",
                ));
                Err(err)
            }
        }
    }

    /// Dismiss a failed save and return to an interactive state.
    pub fn acknowledge(&mut self) {
        if self.status == EditorStatus::SaveFailed {
            self.status = self.idle_status();
        }
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn type_key(&self) -> &TypeKey {
        &self.type_key
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn into_document(self) -> Value {
        self.document
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn status(&self) -> EditorStatus {
        self.status
    }

    fn idle_status(&self) -> EditorStatus {
        if self.dirty {
            EditorStatus::Editing
        } else {
            EditorStatus::Ready
        }
    }

    fn apply(&mut self, next: Value) -> bool {
        self.document = next;
        self.dirty = true;
        self.status = EditorStatus::Editing;
        true
    }
}
