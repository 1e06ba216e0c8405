//! Update report types
//!
//! Provides structures for tracking update results at package, file and
//! run level. A `PackageUpdate` only exists for a version that actually
//! changed, and a `ManifestUpdateResult` only exists for a manifest with at
//! least one update.

use super::ManifestKind;
use serde::Serialize;

/// A package whose declared version changed during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageUpdate {
    name: String,
    old_version: String,
    new_version: String,
}

impl PackageUpdate {
    /// Compares the declared version before and after an update.
    ///
    /// Returns `None` when both strings are equal. The comparison is on the
    /// raw manifest text, so `^1.0.0` and `1.0.0` count as different.
    pub fn detect(
        name: impl Into<String>,
        old_version: impl Into<String>,
        new_version: impl Into<String>,
    ) -> Option<Self> {
        let old_version = old_version.into();
        let new_version = new_version.into();
        if old_version == new_version {
            return None;
        }
        Some(Self {
            name: name.into(),
            old_version,
            new_version,
        })
    }

    /// Package name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared version before the update
    pub fn old_version(&self) -> &str {
        &self.old_version
    }

    /// Declared version after the update
    pub fn new_version(&self) -> &str {
        &self.new_version
    }
}

/// Updates applied to a single manifest file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestUpdateResult {
    path: String,
    updates: Vec<PackageUpdate>,
}

impl ManifestUpdateResult {
    /// Creates a result for a manifest, or `None` when nothing changed
    pub fn new(path: impl Into<String>, updates: Vec<PackageUpdate>) -> Option<Self> {
        if updates.is_empty() {
            return None;
        }
        Some(Self {
            path: path.into(),
            updates,
        })
    }

    /// Path relative to the scan root, with a leading separator
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Updated packages in the order they were processed
    pub fn updates(&self) -> &[PackageUpdate] {
        &self.updates
    }

    /// Returns the number of updates
    pub fn update_count(&self) -> usize {
        self.updates.len()
    }
}

/// A package whose update command did not complete successfully
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolFailure {
    /// Manifest path relative to the scan root
    pub path: String,
    /// Package that was being updated
    pub package: String,
    /// Human-readable reason (exit code or timeout)
    pub reason: String,
}

impl ToolFailure {
    /// Creates a new tool failure record
    pub fn new(
        path: impl Into<String>,
        package: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            package: package.into(),
            reason: reason.into(),
        }
    }
}

/// Outcome of one orchestration run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Kind of manifest this run processed
    pub kind: ManifestKind,
    manifests: Vec<ManifestUpdateResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    failures: Vec<ToolFailure>,
}

impl Report {
    /// Creates an empty report
    pub fn new(kind: ManifestKind) -> Self {
        Self {
            kind,
            manifests: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Appends a manifest result, keeping discovery order
    pub fn add_manifest(&mut self, manifest: ManifestUpdateResult) {
        self.manifests.push(manifest);
    }

    /// Records a failed update command
    pub fn add_failure(&mut self, failure: ToolFailure) {
        self.failures.push(failure);
    }

    /// Manifests that changed, in discovery order
    pub fn manifests(&self) -> &[ManifestUpdateResult] {
        &self.manifests
    }

    /// Update commands that failed or timed out
    pub fn failures(&self) -> &[ToolFailure] {
        &self.failures
    }

    /// Returns true if no manifest changed
    pub fn is_empty(&self) -> bool {
        self.manifests.is_empty()
    }

    /// Returns the total number of updated packages
    pub fn total_updates(&self) -> usize {
        self.manifests.iter().map(|m| m.update_count()).sum()
    }

    /// Returns true if any update command failed
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
