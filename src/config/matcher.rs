//! Fragment file matcher.

use std::path::Path;

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::{
    BundlerSettings,
    ComponentNaming,
    DEFAULT_FRAGMENT_SUFFIX,
};

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Decides which files are fragments and which component they belong to.
#[derive(Debug, Clone)]
pub struct FragmentMatcher {
    /// File name suffix of fragment files
    suffix: String,
    naming: ComponentNaming,
    /// Compiled `excludePatterns`
    exclude_set: GlobSet,
}

impl Default for FragmentMatcher {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_FRAGMENT_SUFFIX.to_string(),
            naming: ComponentNaming::default(),
            exclude_set: GlobSet::empty(),
        }
    }
}

impl FragmentMatcher {
    /// Creates a new matcher from settings.
    pub fn new(settings: &BundlerSettings) -> Result<Self, MatcherError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &settings.exclude_patterns {
            let glob = Glob::new(pattern).map_err(|source| {
                MatcherError::InvalidExcludePattern { pattern: pattern.clone(), source }
            })?;
            builder.add(glob);
        }

        Ok(Self {
            suffix: settings.fragment_suffix.clone(),
            naming: settings.component_naming,
            exclude_set: builder.build()?,
        })
    }

    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Returns the component name if `path` names a fragment file.
    ///
    /// Only the file name is inspected. Non UTF-8 names never match.
    #[must_use]
    pub fn component_name(&self, path: &Path) -> Option<String> {
        let file_name = path.file_name()?.to_str()?;
        if !file_name.ends_with(&self.suffix) {
            return None;
        }

        let component = match self.naming {
            ComponentNaming::FirstSegment => file_name.split('.').next()?,
            ComponentNaming::StripSuffix => file_name.strip_suffix(&self.suffix)?,
        };
        Some(component.to_string())
    }

    /// Returns true if the path matches `excludePatterns`.
    ///
    /// The path must be relative to the fragment root.
    #[must_use]
    pub fn is_excluded(&self, relative_path: &Path) -> bool {
        self.exclude_set.is_match(relative_path)
    }
}
