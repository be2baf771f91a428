//! Fill: back-fill keys missing from one language with placeholders.

use std::path::Path;

use serde_json::Value;

use super::{
    BundleError,
    FillOptions,
    FillReport,
    block,
    block_or_insert_mut,
    source_missing,
};
use crate::discovery::find_fragments;
use crate::document::{
    JsonObject,
    read_object,
    value_text,
    write_json,
};

/// Placeholder for a key the target language lacks: `"<target>:<source text>"`.
#[must_use]
pub fn placeholder(target_language: &str, source_value: &Value) -> String {
    format!("{target_language}:{}", value_text(source_value))
}

/// Adds every key of the source language that the target language lacks,
/// rewriting each fragment in place.
///
/// Existing target values are never replaced and nothing is removed, so a
/// second run changes nothing. A missing `source_dir` is not an error.
///
/// # Errors
/// - empty language
/// - the fragment tree cannot be walked
/// - a fragment cannot be read, parsed or written
/// - a fragment lacks the source language
pub fn fill(options: &FillOptions) -> Result<FillReport, BundleError> {
    options.validate()?;

    if source_missing(&options.source_dir) {
        return Ok(FillReport::default());
    }

    let mut report = FillReport::default();
    for fragment in find_fragments(&options.source_dir, &options.matcher)? {
        let mut document = read_object(&fragment.path)?;
        let target_existed = document.contains_key(&options.target_language);

        let keys_added = fill_document(
            &mut document,
            &fragment.path,
            &options.source_language,
            &options.target_language,
        )?;
        write_json(&fragment.path, &Value::Object(document), options.pretty)?;

        tracing::debug!(path = %fragment.path.display(), keys_added, "Filled fragment");
        report.fragments += 1;
        report.keys_added += keys_added;
        if keys_added > 0 || !target_existed {
            report.fragments_changed += 1;
        }
    }

    tracing::info!(
        source_language = %options.source_language,
        target_language = %options.target_language,
        fragments = report.fragments,
        keys_added = report.keys_added,
        "Filled missing translations"
    );
    Ok(report)
}

/// Fills one fragment document and returns the number of keys added.
///
/// The target block is created (appended last) when absent. On error the
/// document is left as it was.
///
/// # Errors
/// - the source language is absent
/// - the source or target block is not an object
pub fn fill_document(
    document: &mut JsonObject,
    path: &Path,
    source_language: &str,
    target_language: &str,
) -> Result<usize, BundleError> {
    let Some(source) = block(document, source_language, path)? else {
        return Err(BundleError::MissingLanguage {
            path: path.to_path_buf(),
            language: source_language.to_string(),
        });
    };
    let target = block(document, target_language, path)?;

    let missing: Vec<(String, Value)> = source
        .iter()
        .filter(|(key, _)| !target.is_some_and(|t| t.contains_key(key.as_str())))
        .map(|(key, value)| (key.clone(), Value::String(placeholder(target_language, value))))
        .collect();

    let keys_added = missing.len();
    block_or_insert_mut(document, target_language, path)?.extend(missing);

    Ok(keys_added)
}
