//! Per-manifest package updater
//!
//! For one manifest file: extract the declared dependencies, run the package
//! manager once per package, re-read the declared version and keep every
//! package whose version text changed.

use crate::config::Config;
use crate::domain::PackageUpdate;
use crate::error::{AppError, CommandError, ManifestError};
use crate::filter::UpdateFilter;
use crate::manifest::{get_parser, read_manifest, ManifestParser};
use crate::package_manager::{CommandRunner, UpdateCommand};
use crate::progress::Progress;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// A package whose update command failed or timed out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedPackage {
    /// Package name
    pub package: String,
    /// Why the command did not complete
    pub reason: String,
}

/// Everything that happened to one manifest file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileUpdateOutcome {
    /// Packages whose declared version changed, in extraction order
    pub updates: Vec<PackageUpdate>,
    /// Packages whose update command failed
    pub failures: Vec<FailedPackage>,
}

/// Updates every declared package of a single manifest
pub struct PackageUpdater {
    parser: Box<dyn ManifestParser>,
    runner: Arc<dyn CommandRunner>,
    program: String,
    filter: UpdateFilter,
    fail_on_tool_error: bool,
    progress: Progress,
}

impl PackageUpdater {
    /// Create an updater for the kind selected in `config`
    pub fn new(config: &Config, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            parser: get_parser(config.kind),
            runner,
            program: config.tool().to_string(),
            filter: config.filter(),
            fail_on_tool_error: config.fail_on_tool_error,
            progress: Progress::new(false),
        }
    }

    /// Report each package attempt on `progress`
    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self
    }

    /// Update all packages declared in `manifest`.
    ///
    /// A manifest that no longer exists yields an empty outcome. Parse
    /// errors, a package disappearing from the manifest and a tool that
    /// cannot be started abort with an error. A package whose command failed
    /// is still probed, and its change is kept when the manifest can be read.
    pub async fn update(&self, manifest: &Path) -> Result<FileUpdateOutcome, AppError> {
        let mut outcome = FileUpdateOutcome::default();

        if !manifest.exists() {
            debug!(manifest = %manifest.display(), "manifest vanished, skipping");
            return Ok(outcome);
        }

        let content = read_manifest(manifest)?;
        let dependencies = self.parser.extract(&content, manifest)?;

        for dep in dependencies {
            if !self.filter.should_process_package(&dep.name) {
                debug!(package = %dep.name, "filtered out");
                continue;
            }

            let command =
                UpdateCommand::for_package(self.parser.kind(), &self.program, manifest, &dep.name);
            debug!(command = %command.display(), cwd = %command.working_dir.display(), "running update");
            self.progress.package(&dep.name);

            let tool_error = match self.runner.run(&command).await {
                Ok(output) if output.success => None,
                Ok(output) => {
                    if !output.stderr.is_empty() {
                        debug!(package = %dep.name, stderr = %output.stderr.trim(), "update command output");
                    }
                    Some(CommandError::failed(&self.program, &dep.name, output.code))
                }
                Err(error @ CommandError::Timeout { .. }) => Some(error),
                Err(error) => return Err(error.into()),
            };

            let probed = self.probe(manifest, &dep.name);
            let new_version = match tool_error {
                None => probed?,
                Some(error) => {
                    self.record_failure(error, &dep.name, &mut outcome)?;
                    // The tool may have edited the manifest before failing
                    match probed {
                        Ok(version) => version,
                        Err(e) => {
                            debug!(package = %dep.name, error = %e, "manifest unreadable after failed update");
                            continue;
                        }
                    }
                }
            };
            debug!(
                package = %dep.name,
                old = %dep.declared_version,
                new = %new_version,
                "probed version"
            );

            if let Some(update) = PackageUpdate::detect(dep.name, dep.declared_version, new_version)
            {
                outcome.updates.push(update);
            }
        }

        Ok(outcome)
    }

    /// Re-read the manifest and return the declared version of `package`
    fn probe(&self, manifest: &Path, package: &str) -> Result<String, ManifestError> {
        let content = read_manifest(manifest)?;
        self.parser.probe(&content, manifest, package)
    }

    fn record_failure(
        &self,
        error: CommandError,
        package: &str,
        outcome: &mut FileUpdateOutcome,
    ) -> Result<(), AppError> {
        if self.fail_on_tool_error {
            return Err(error.into());
        }
        warn!(package = %package, error = %error, "update command failed");
        outcome.failures.push(FailedPackage {
            package: package.to_string(),
            reason: error.to_string(),
        });
        Ok(())
    }
}
