pub mod model;
pub mod path;
pub mod type_key;

pub use model::{is_empty_content, ContentDocument, ContentSummary};
pub use path::{FieldPath, PathError, Segment};
pub use type_key::{TypeKey, TypeKeyError};
