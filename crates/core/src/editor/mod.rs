//! Generic document editor: one implementation of load / edit / reorder /
//! save, parameterized per page by a [`PageSchema`].

pub mod action;
pub mod ops;
pub mod pages;
pub mod schema;
pub mod session;

pub use action::{ActionError, EditAction};
pub use pages::{builtin_pages, PageRegistry};
pub use schema::{FieldGroup, FieldSpec, PageSchema, SchemaError, Widget};
pub use session::{EditorSession, EditorStatus, Notice, NoticeLevel};
