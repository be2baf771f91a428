//! Split: push a combined language file back into the fragments.

use std::path::Path;

use serde_json::Value;

use super::{
    BundleError,
    SplitOptions,
    SplitReport,
    block,
    block_or_insert_mut,
    source_missing,
};
use crate::discovery::find_fragments;
use crate::document::{
    JsonObject,
    read_object,
    write_json,
};

/// Writes the values of a combined file into the matching language block
/// of every fragment.
///
/// Keys present in the combined file overwrite the fragment's values; keys
/// only the fragment has are kept. A missing `source_dir` is not an error,
/// but the combined file is always read first.
///
/// # Errors
/// - empty language or combined file path
/// - the combined file cannot be read or parsed
/// - the fragment tree cannot be walked
/// - a fragment's component is missing from the combined file
/// - a fragment cannot be read, parsed or written
pub fn split(options: &SplitOptions) -> Result<SplitReport, BundleError> {
    options.validate()?;

    let combined = read_object(&options.combined_file)?;
    tracing::debug!(
        file = %options.combined_file.display(),
        components = combined.len(),
        "Loaded combined file"
    );

    if source_missing(&options.source_dir) {
        return Ok(SplitReport::default());
    }

    let mut report = SplitReport::default();
    for fragment in find_fragments(&options.source_dir, &options.matcher)? {
        let Some(new_values) = block(&combined, &fragment.component, &options.combined_file)? else {
            return Err(BundleError::MissingComponent {
                fragment: fragment.path,
                combined: options.combined_file.clone(),
                component: fragment.component,
            });
        };

        let mut document = read_object(&fragment.path)?;
        let keys_written =
            split_into_document(&mut document, &fragment.path, &options.language, new_values)?;
        write_json(&fragment.path, &Value::Object(document), options.pretty)?;

        tracing::debug!(path = %fragment.path.display(), keys_written, "Split into fragment");
        report.fragments += 1;
        report.keys_written += keys_written;
    }

    tracing::info!(
        language = %options.language,
        fragments = report.fragments,
        keys_written = report.keys_written,
        "Split combined file into fragments"
    );
    Ok(report)
}

/// Merges `new_values` into `document[language]` and returns the number of
/// keys written.
///
/// The language block is created (appended last) when absent.
///
/// # Errors
/// Returns error if the language block exists but is not an object.
pub fn split_into_document(
    document: &mut JsonObject,
    path: &Path,
    language: &str,
    new_values: &JsonObject,
) -> Result<usize, BundleError> {
    let current = block_or_insert_mut(document, language, path)?;
    for (key, value) in new_values {
        current.insert(key.clone(), value.clone());
    }
    Ok(new_values.len())
}
