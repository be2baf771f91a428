use std::path::{
    Component,
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Default fragment file suffix.
pub const DEFAULT_FRAGMENT_SUFFIX: &str = ".i18n.json";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "excludePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// バリデーションエラーを番号付きの行に整形する
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// How a component name is derived from a fragment file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentNaming {
    /// Everything before the first `.` (`a.b.i18n.json` -> `a`).
    #[default]
    FirstSegment,
    /// File name with the fragment suffix removed (`a.b.i18n.json` -> `a.b`).
    StripSuffix,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct BundlerSettings {
    /// Root of the fragment tree, relative to the project directory.
    pub source_dir: PathBuf,
    /// Directory combined files are written to, relative to the project directory.
    pub output_dir: PathBuf,
    /// Optional subdirectory of `output_dir` for combined files.
    pub path_prefix: Option<String>,

    pub fragment_suffix: String,
    pub component_naming: ComponentNaming,

    /// Glob patterns (relative to `source_dir`) of fragments to leave alone.
    pub exclude_patterns: Vec<String>,

    pub combine: CombineConfig,
    pub fill: RewriteConfig,
    pub split: RewriteConfig,
}

impl Default for BundlerSettings {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("src/main/resources/public"),
            output_dir: PathBuf::from("target/generated-resources"),
            path_prefix: None,
            fragment_suffix: DEFAULT_FRAGMENT_SUFFIX.to_string(),
            component_naming: ComponentNaming::default(),
            exclude_patterns: Vec::new(),
            combine: CombineConfig::default(),
            fill: RewriteConfig::default(),
            split: RewriteConfig::default(),
        }
    }
}

/// Output format of combined files. Compact unless told otherwise.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CombineConfig {
    pub pretty: bool,
}

/// Output format of fragments rewritten in place. Pretty unless told otherwise.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RewriteConfig {
    pub pretty: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl BundlerSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Path prefix escapes the output directory
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.fragment_suffix.is_empty() {
            errors.push(ValidationError::new(
                "fragmentSuffix",
                "The suffix cannot be empty. Example: \".i18n.json\"",
            ));
        }

        if self.source_dir.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "sourceDir",
                "The source directory cannot be empty. Example: \"src/main/resources/public\"",
            ));
        }

        if self.output_dir.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "outputDir",
                "The output directory cannot be empty. Example: \"target/generated-resources\"",
            ));
        }

        if let Some(prefix) = &self.path_prefix
            && !is_relative_subpath(Path::new(prefix))
        {
            errors.push(ValidationError::new(
                "pathPrefix",
                format!(
                    "'{prefix}' must be a relative path inside the output directory, or remove this field"
                ),
            ));
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// `..` やルートを含まない相対パスかどうか
fn is_relative_subpath(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
