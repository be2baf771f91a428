//! Per-operation parameters.

use std::path::PathBuf;

use crate::config::{
    ConfigError,
    FragmentMatcher,
    ValidationError,
};

/// Parameters of [`combine`](super::combine).
#[derive(Debug, Clone)]
pub struct CombineOptions {
    /// Root of the fragment tree.
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Subdirectory of `output_dir` that receives the combined files.
    pub path_prefix: Option<String>,
    pub pretty: bool,
    pub matcher: FragmentMatcher,
}

impl CombineOptions {
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
            path_prefix: None,
            pretty: false,
            matcher: FragmentMatcher::default(),
        }
    }

    /// Directory the combined files are written to.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        match &self.path_prefix {
            Some(prefix) => self.output_dir.join(prefix),
            None => self.output_dir.clone(),
        }
    }
}

/// Parameters of [`fill`](super::fill).
#[derive(Debug, Clone)]
pub struct FillOptions {
    pub source_dir: PathBuf,
    /// Language whose keys are the template, e.g. `de`.
    pub source_language: String,
    /// Language that receives placeholders, e.g. `en`.
    pub target_language: String,
    pub pretty: bool,
    pub matcher: FragmentMatcher,
}

impl FillOptions {
    #[must_use]
    pub fn new(
        source_dir: impl Into<PathBuf>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
            pretty: true,
            matcher: FragmentMatcher::default(),
        }
    }

    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        if self.source_language.is_empty() {
            errors.push(ValidationError::new("sourceLanguage", "A source language is required"));
        }
        if self.target_language.is_empty() {
            errors.push(ValidationError::new("targetLanguage", "A target language is required"));
        }
        if errors.is_empty() { Ok(()) } else { Err(ConfigError::ValidationErrors(errors)) }
    }
}

/// Parameters of [`split`](super::split).
#[derive(Debug, Clone)]
pub struct SplitOptions {
    pub source_dir: PathBuf,
    /// Combined document whose values are pushed into the fragments.
    pub combined_file: PathBuf,
    /// Language block of each fragment that receives the values.
    pub language: String,
    pub pretty: bool,
    pub matcher: FragmentMatcher,
}

impl SplitOptions {
    #[must_use]
    pub fn new(
        source_dir: impl Into<PathBuf>,
        combined_file: impl Into<PathBuf>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            combined_file: combined_file.into(),
            language: language.into(),
            pretty: true,
            matcher: FragmentMatcher::default(),
        }
    }

    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        if self.combined_file.as_os_str().is_empty() {
            errors.push(ValidationError::new("file", "A combined file is required"));
        }
        if self.language.is_empty() {
            errors.push(ValidationError::new("language", "A language is required"));
        }
        if errors.is_empty() { Ok(()) } else { Err(ConfigError::ValidationErrors(errors)) }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::no_prefix(None, "out")]
    #[case::prefix(Some("app"), "out/app")]
    fn test_combine_output_path(#[case] prefix: Option<&str>, #[case] expected: &str) {
        let mut options = CombineOptions::new("src", "out");
        options.path_prefix = prefix.map(str::to_string);

        assert_eq!(options.output_path(), PathBuf::from(expected));
    }

    #[rstest]
    fn test_defaults() {
        assert!(!CombineOptions::new("src", "out").pretty);
        assert!(FillOptions::new("src", "de", "en").pretty);
        assert!(SplitOptions::new("src", "de.json", "de").pretty);
    }

    #[rstest]
    #[case::both_present("de", "en", true)]
    #[case::missing_source("", "en", false)]
    #[case::missing_target("de", "", false)]
    fn test_fill_validate(#[case] source: &str, #[case] target: &str, #[case] valid: bool) {
        let options = FillOptions::new("src", source, target);

        assert_eq!(options.validate().is_ok(), valid);
    }

    #[rstest]
    #[case::both_present("de.json", "de", true)]
    #[case::missing_file("", "de", false)]
    #[case::missing_language("de.json", "", false)]
    fn test_split_validate(#[case] file: &str, #[case] language: &str, #[case] valid: bool) {
        let options = SplitOptions::new("src", file, language);

        assert_eq!(options.validate().is_ok(), valid);
    }
}
