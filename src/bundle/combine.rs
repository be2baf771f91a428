//! Combine: one fragment per component into one file per language.

use std::collections::BTreeMap;
use std::path::{
    Component,
    Path,
};

use serde_json::Value;

use super::{
    BundleError,
    CombineOptions,
    CombineReport,
    source_missing,
};
use crate::discovery::{
    FragmentFile,
    find_fragments,
};
use crate::document::{
    JsonObject,
    read_object,
    write_json,
};

/// Language -> (component -> value of `fragment[language]`).
pub type LanguageBundles = BTreeMap<String, JsonObject>;

/// Combines every fragment under `source_dir` into `<output>/<language>.json`.
///
/// The output directory is created first, even when there is nothing to
/// combine. A missing `source_dir` is not an error.
///
/// # Errors
/// - the output directory cannot be created
/// - the fragment tree cannot be walked
/// - a fragment cannot be read or parsed
/// - a combined file cannot be written
pub fn combine(options: &CombineOptions) -> Result<CombineReport, BundleError> {
    let output_path = options.output_path();
    std::fs::create_dir_all(&output_path)
        .map_err(|source| BundleError::CreateOutputDir { path: output_path.clone(), source })?;

    if source_missing(&options.source_dir) {
        return Ok(CombineReport::default());
    }

    let fragments = find_fragments(&options.source_dir, &options.matcher)?;
    let bundles = combine_fragments(&fragments)?;

    let languages: Vec<String> = bundles.keys().cloned().collect();
    tracing::info!(languages = ?languages, "Found i18n languages");

    let mut files_written = Vec::with_capacity(bundles.len());
    for (language, components) in bundles {
        let path = output_path.join(format!("{language}.json"));
        tracing::debug!(path = %path.display(), components = components.len(), "Writing combined file");
        write_json(&path, &Value::Object(components), options.pretty)?;
        files_written.push(path);
    }

    Ok(CombineReport { languages, fragments: fragments.len(), files_written })
}

/// Regroups fragments by language.
///
/// Values are moved over verbatim, whatever their shape. When two fragments
/// share a component name, the later one wins for every language both define.
///
/// # Errors
/// - a fragment cannot be read or is not a JSON object
/// - a language key is not a plain file name
pub fn combine_fragments(fragments: &[FragmentFile]) -> Result<LanguageBundles, BundleError> {
    let mut bundles = LanguageBundles::new();

    for fragment in fragments {
        tracing::debug!(path = %fragment.path.display(), component = %fragment.component, "Combining fragment");
        let document = read_object(&fragment.path)?;

        for (language, value) in document {
            if !is_file_name(&language) {
                return Err(BundleError::InvalidLanguage { path: fragment.path.clone(), language });
            }
            let components = bundles.entry(language).or_default();
            if components.insert(fragment.component.clone(), value).is_some() {
                tracing::warn!(
                    component = %fragment.component,
                    path = %fragment.path.display(),
                    "Component defined by more than one fragment, keeping the last one"
                );
            }
        }
    }

    Ok(bundles)
}

/// A single normal path component, usable as `<language>.json`.
fn is_file_name(language: &str) -> bool {
    let mut components = Path::new(language).components();
    matches!(components.next(), Some(Component::Normal(_))) && components.next().is_none()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::test_utils::{
        read_json,
        write_fragment,
    };

    fn options(temp_dir: &TempDir) -> CombineOptions {
        CombineOptions::new(temp_dir.path().join("public"), temp_dir.path().join("out"))
    }

    #[rstest]
    fn test_combine_groups_components_by_language() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("public");
        write_fragment(&root, "a.i18n.json", &json!({"de": {"x": "1"}, "en": {"x": "2"}}));
        write_fragment(&root, "nested/b.i18n.json", &json!({"de": {"y": "3"}}));

        let report = combine(&options(&temp_dir)).unwrap();

        assert_eq!(report.languages, vec!["de".to_string(), "en".to_string()]);
        assert_eq!(report.fragments, 2);
        assert_eq!(report.files_written.len(), 2);
        let out = temp_dir.path().join("out");
        assert_eq!(read_json(&out.join("de.json")), json!({"a": {"x": "1"}, "b": {"y": "3"}}));
        assert_eq!(read_json(&out.join("en.json")), json!({"a": {"x": "2"}}));
    }

    #[rstest]
    fn test_combine_copies_values_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("public");
        let value = json!({"plural": {"one": "Datei", "other": "Dateien"}, "count": 3, "list": [1, null]});
        write_fragment(&root, "files.i18n.json", &json!({"de": value.clone(), "raw": "text"}));

        combine(&options(&temp_dir)).unwrap();

        let out = temp_dir.path().join("out");
        assert_eq!(read_json(&out.join("de.json")), json!({"files": value}));
        assert_eq!(read_json(&out.join("raw.json")), json!({"files": "text"}));
    }

    #[rstest]
    fn test_combine_does_not_touch_fragments() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("public");
        let path = write_fragment(&root, "a.i18n.json", &json!({"de": {"x": "1"}}));
        let before = fs::read_to_string(&path).unwrap();

        combine(&options(&temp_dir)).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[rstest]
    fn test_combine_writes_below_path_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("public");
        write_fragment(&root, "a.i18n.json", &json!({"de": {"x": "1"}}));
        let mut options = options(&temp_dir);
        options.path_prefix = Some("app/i18n".to_string());

        let report = combine(&options).unwrap();

        let expected = temp_dir.path().join("out/app/i18n/de.json");
        assert_eq!(report.files_written, vec![expected.clone()]);
        assert_eq!(read_json(&expected), json!({"a": {"x": "1"}}));
    }

    #[rstest]
    #[case::compact(false, r#"{"a":{"x":"1"}}"#)]
    #[case::pretty(true, "{\n  \"a\": {\n    \"x\": \"1\"\n  }\n}\n")]
    fn test_combine_output_format(#[case] pretty: bool, #[case] expected: &str) {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("public");
        write_fragment(&root, "a.i18n.json", &json!({"de": {"x": "1"}}));
        let mut options = options(&temp_dir);
        options.pretty = pretty;

        combine(&options).unwrap();

        let text = fs::read_to_string(temp_dir.path().join("out/de.json")).unwrap();
        assert_eq!(text, expected);
    }

    #[googletest::test]
    fn test_combine_missing_source_creates_output_dir_only() {
        let temp_dir = TempDir::new().unwrap();

        let report = combine(&options(&temp_dir)).unwrap();

        expect_that!(report.files_written.len(), eq(0));
        expect_that!(report.languages.len(), eq(0));
        expect_true!(temp_dir.path().join("out").is_dir());
        expect_that!(fs::read_dir(temp_dir.path().join("out")).unwrap().count(), eq(0));
    }

    #[rstest]
    fn test_combine_fails_when_output_dir_cannot_be_created() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("out"), "a file, not a directory").unwrap();

        let result = combine(&options(&temp_dir));

        assert!(matches!(result, Err(BundleError::CreateOutputDir { .. })));
    }

    #[rstest]
    fn test_combine_fails_on_malformed_fragment() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("public");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("a.i18n.json"), "{ broken").unwrap();

        let result = combine(&options(&temp_dir));

        assert!(matches!(result, Err(BundleError::Document(_))));
    }

    #[rstest]
    #[case::absolute("/tmp/escaped")]
    #[case::parent("../escaped")]
    #[case::nested("de/at")]
    #[case::current(".")]
    #[case::empty("")]
    fn test_combine_rejects_language_outside_output_dir(#[case] language: &str) {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("public");
        let mut document = JsonObject::new();
        document.insert(language.to_string(), json!({"x": "1"}));
        write_fragment(&root, "a.i18n.json", &Value::Object(document));

        let result = combine(&options(&temp_dir));

        assert!(
            matches!(&result, Err(BundleError::InvalidLanguage { language: l, .. }) if l == language)
        );
        assert_eq!(fs::read_dir(temp_dir.path().join("out")).unwrap().count(), 0);
    }

    #[rstest]
    #[case::plain("de", true)]
    #[case::region("pt-BR", true)]
    #[case::dotted("de.old", true)]
    #[case::separator("a/b", false)]
    #[case::parent("..", false)]
    fn test_is_file_name(#[case] language: &str, #[case] expected: bool) {
        assert_eq!(is_file_name(language), expected);
    }

    #[rstest]
    fn test_combine_fragments_later_duplicate_wins() {
        let temp_dir = TempDir::new().unwrap();
        let first = write_fragment(temp_dir.path(), "one/a.i18n.json", &json!({"de": {"x": "1"}, "fr": {"x": "f"}}));
        let second = write_fragment(temp_dir.path(), "two/a.i18n.json", &json!({"de": {"x": "2"}}));
        let fragments = vec![
            FragmentFile { path: first, component: "a".to_string() },
            FragmentFile { path: second, component: "a".to_string() },
        ];

        let bundles = combine_fragments(&fragments).unwrap();

        assert_eq!(Value::Object(bundles["de"].clone()), json!({"a": {"x": "2"}}));
        assert_eq!(Value::Object(bundles["fr"].clone()), json!({"a": {"x": "f"}}));
    }
}
