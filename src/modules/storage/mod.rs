//! Storage module
//!
//! Provides the JSON snapshot store for reports, users and cleanups, and
//! the local directory store for uploaded photos.

mod json_store;
mod upload_store;

pub use json_store::{Database, JsonStore};
pub use upload_store::{content_type_for_path, StoredImage, UploadStore};
