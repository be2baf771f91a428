//! Combine, fill and split operations over a fragment tree.
//!
//! A fragment holds one component's translations keyed by language; a
//! combined document holds one language's translations keyed by component.
//! Every operation walks the fragment tree with
//! [`find_fragments`](crate::discovery::find_fragments) and treats a missing
//! tree as nothing to do.

mod combine;
mod error;
mod fill;
mod options;
mod report;
mod split;

use std::path::Path;

use serde_json::Value;

pub use combine::{
    LanguageBundles,
    combine,
    combine_fragments,
};
pub use error::BundleError;
pub use fill::{
    fill,
    fill_document,
    placeholder,
};
pub use options::{
    CombineOptions,
    FillOptions,
    SplitOptions,
};
pub use report::{
    CombineReport,
    FillReport,
    SplitReport,
};
pub use split::{
    split,
    split_into_document,
};

use crate::document::JsonObject;

/// Returns the object stored under `key`, inserting an empty one if absent.
fn block_or_insert_mut<'a>(
    document: &'a mut JsonObject,
    key: &str,
    path: &Path,
) -> Result<&'a mut JsonObject, BundleError> {
    document
        .entry(key)
        .or_insert_with(|| Value::Object(JsonObject::new()))
        .as_object_mut()
        .ok_or_else(|| BundleError::NotAnObject { path: path.to_path_buf(), key: key.to_string() })
}

/// Returns the object stored under `key`, `None` if absent.
fn block<'a>(
    document: &'a JsonObject,
    key: &str,
    path: &Path,
) -> Result<Option<&'a JsonObject>, BundleError> {
    match document.get(key) {
        None => Ok(None),
        Some(Value::Object(object)) => Ok(Some(object)),
        Some(_) => Err(BundleError::NotAnObject { path: path.to_path_buf(), key: key.to_string() }),
    }
}

/// Logs and reports that the fragment root is absent.
fn source_missing(source_dir: &Path) -> bool {
    if source_dir.exists() {
        return false;
    }
    tracing::info!(
        source_dir = %source_dir.display(),
        "No fragment directory found, nothing to do"
    );
    true
}
