//! Dependency information as declared in a manifest

use std::fmt;

/// A package and its declared version, read straight from a manifest
/// before any update is attempted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDependency {
    /// Package name
    pub name: String,
    /// Version text exactly as written in the manifest
    pub declared_version: String,
}

impl RawDependency {
    /// Creates a new raw dependency
    pub fn new(name: impl Into<String>, declared_version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_version: declared_version.into(),
        }
    }
}

impl fmt::Display for RawDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.declared_version)
    }
}
