//! Manifest file discovery
//!
//! Walks a directory tree depth-first and collects every regular file whose
//! path ends with a given suffix. Entries are visited in the order the
//! filesystem lists them; no sorting is applied, so the report order follows
//! the directory listing.

use crate::domain::ManifestKind;
use crate::error::DiscoveryError;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Find all files below `root` whose full path ends with `suffix`.
///
/// Returned paths are relative to `root` and keep a leading separator
/// (`/a/package.json`), so they can be rejoined with [`absolute_path`].
pub fn find_files(root: &Path, suffix: &str) -> Result<Vec<String>, DiscoveryError> {
    if !root.exists() {
        return Err(DiscoveryError::root_not_found(root));
    }
    if !root.is_dir() {
        return Err(DiscoveryError::not_a_directory(root));
    }

    let mut files = Vec::new();
    walk_dir(root, root, suffix, &mut files)?;
    Ok(files)
}

/// Find all manifests of the given kind below `root`
pub fn detect_manifests(root: &Path, kind: ManifestKind) -> Result<Vec<String>, DiscoveryError> {
    find_files(root, kind.manifest_suffix())
}

/// Rejoin a scanner-relative path with the scan root
pub fn absolute_path(root: &Path, relative: &str) -> PathBuf {
    root.join(relative.trim_start_matches(['/', '\\']))
}

fn walk_dir(
    root: &Path,
    current: &Path,
    suffix: &str,
    files: &mut Vec<String>,
) -> Result<(), DiscoveryError> {
    let entries = std::fs::read_dir(current).map_err(|e| DiscoveryError::read_dir(current, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| DiscoveryError::read_dir(current, e))?;
        let path = entry.path();
        // Follows symlinks, like the listing itself
        let metadata = std::fs::metadata(&path).map_err(|e| DiscoveryError::read_dir(&path, e))?;

        if metadata.is_file() {
            if path.as_os_str().to_string_lossy().ends_with(suffix) {
                files.push(relative_path(root, &path));
            }
        } else if metadata.is_dir() {
            walk_dir(root, &path, suffix, files)?;
        }
    }

    Ok(())
}

fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    format!("{}{}", MAIN_SEPARATOR, relative.display())
}
