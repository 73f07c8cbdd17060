//! Content model and services for the motorcycle workshop site: content
//! documents and their store, the access layer, the generic page editor,
//! image storage, and the admin sign-in gate.

pub mod access;
pub mod assets;
pub mod auth;
pub mod document;
pub mod editor;
pub mod store;

pub use access::{AccessError, ContentService, Origin};
pub use assets::{Asset, AssetError, AssetStore};
pub use auth::{AdminAccount, AuthError, AuthGate, Session, SessionUser};
pub use document::{ContentDocument, FieldPath, TypeKey};
