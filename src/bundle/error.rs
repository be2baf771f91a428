use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::discovery::DiscoveryError;
use crate::document::DocumentError;

/// Defines errors that abort a combine, fill or split run
#[derive(Error, Debug)]
pub enum BundleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The directory combined files go to could not be created
    #[error("Unable to create output directory {}", path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A fragment lacks the language a fill reads from
    #[error("Language '{language}' not found in {}", path.display())]
    MissingLanguage { path: PathBuf, language: String },

    /// The combined document has no entry for a fragment's component
    #[error("Component '{component}' of {} not found in {}", fragment.display(), combined.display())]
    MissingComponent { fragment: PathBuf, combined: PathBuf, component: String },

    /// A language key that cannot name a combined file
    #[error("Language '{language}' in {} is not a valid file name", path.display())]
    InvalidLanguage { path: PathBuf, language: String },

    /// A language or component block is not a JSON object
    #[error("Expected '{key}' in {} to be a JSON object", path.display())]
    NotAnObject { path: PathBuf, key: String },
}
