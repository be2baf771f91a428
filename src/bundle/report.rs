//! Structured results of a run.

use std::path::PathBuf;

/// Result of [`combine`](super::combine).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombineReport {
    /// Languages found, in output order.
    pub languages: Vec<String>,
    /// Number of fragment files read.
    pub fragments: usize,
    pub files_written: Vec<PathBuf>,
}

/// Result of [`fill`](super::fill).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillReport {
    pub fragments: usize,
    /// Fragments that gained keys or a new target language block.
    pub fragments_changed: usize,
    pub keys_added: usize,
}

/// Result of [`split`](super::split).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitReport {
    pub fragments: usize,
    pub keys_written: usize,
}
