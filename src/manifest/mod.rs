//! Manifest file discovery and parsing
//!
//! This module provides functionality to:
//! - Discover manifest files below a root directory
//! - Extract declared dependencies from each manifest kind
//! - Probe the currently declared version of a single package

mod csproj;
mod detector;
mod package_json;

pub use csproj::CsprojParser;
pub use detector::{absolute_path, detect_manifests, find_files};
pub use package_json::PackageJsonParser;

use crate::domain::{ManifestKind, RawDependency};
use crate::error::ManifestError;
use std::path::Path;

/// Trait for reading dependencies out of a manifest file.
///
/// `path` is only used for error reporting; the content is passed in by
/// the caller.
pub trait ManifestParser: Send + Sync {
    /// Extract all declared dependencies in manifest order
    fn extract(&self, content: &str, path: &Path) -> Result<Vec<RawDependency>, ManifestError>;

    /// Return the currently declared version of `package`.
    ///
    /// Fails with [`ManifestError::PackageNotFound`] when the manifest does
    /// not declare it.
    fn probe(&self, content: &str, path: &Path, package: &str) -> Result<String, ManifestError>;

    /// Returns the manifest kind this parser handles
    fn kind(&self) -> ManifestKind;
}

/// Get a manifest parser for the specified kind
pub fn get_parser(kind: ManifestKind) -> Box<dyn ManifestParser> {
    match kind {
        ManifestKind::Npm => Box::new(PackageJsonParser),
        ManifestKind::NuGet => Box::new(CsprojParser),
    }
}

/// Read a manifest file from disk
pub fn read_manifest(path: &Path) -> Result<String, ManifestError> {
    std::fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))
}
