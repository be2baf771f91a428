//! Discovery type definitions.

use std::path::PathBuf;

use thiserror::Error;

/// A fragment file found under the fragment root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentFile {
    pub path: PathBuf,
    /// Component name derived from the file name.
    pub component: String,
}

#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// The fragment root does not exist
    #[error("Fragment root not found: {}", .0.display())]
    RootNotFound(PathBuf),
    /// The fragment root exists but is not a directory
    #[error("Fragment root is not a directory: {}", .0.display())]
    RootNotADirectory(PathBuf),
    /// A directory below the root could not be read
    #[error("Failed to walk fragment tree under {}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: ignore::Error,
    },
}
