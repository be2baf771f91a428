//! Fragment tree walker.

use std::path::Path;

use ignore::WalkBuilder;

use crate::config::FragmentMatcher;
use crate::discovery::types::{
    DiscoveryError,
    FragmentFile,
};

/// Finds every fragment file under `root`.
///
/// Every directory is entered; hidden files and ignore files are not
/// honoured. Symlinks are followed, and a linked fragment is reported under
/// its link path. Siblings are visited in file name order. A directory is
/// never a fragment, whatever its name.
///
/// # Errors
/// - `root` does not exist or is not a directory
/// - a directory below `root` cannot be read
/// - a symlink loop
pub fn find_fragments(
    root: &Path,
    matcher: &FragmentMatcher,
) -> Result<Vec<FragmentFile>, DiscoveryError> {
    if !root.exists() {
        return Err(DiscoveryError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(DiscoveryError::RootNotADirectory(root.to_path_buf()));
    }

    tracing::debug!(root = %root.display(), suffix = matcher.suffix(), "Searching fragments");

    let mut found = Vec::new();
    for result in WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(true)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build()
    {
        let entry =
            result.map_err(|source| DiscoveryError::Walk { root: root.to_path_buf(), source })?;

        // ファイルのみを対象 (シンボリックリンクはリンク先で判定)
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let Some(component) = matcher.component_name(path) else {
            continue;
        };

        let relative_path = path.strip_prefix(root).unwrap_or(path);
        if matcher.is_excluded(relative_path) {
            tracing::debug!(path = %relative_path.display(), "Skipping excluded fragment");
            continue;
        }

        found.push(FragmentFile { path: path.to_path_buf(), component });
    }

    tracing::debug!(count = found.len(), "Fragments found");
    Ok(found)
}
