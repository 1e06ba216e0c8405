//! Update orchestrator for coordinating the entire update workflow
//!
//! This module provides:
//! - Workflow coordination: discover → extract → update → probe → report
//! - Strictly sequential processing, one manifest and one package at a time
//! - Report assembly in discovery order, dropping unchanged manifests

use crate::config::Config;
use crate::domain::{ManifestUpdateResult, Report, ToolFailure};
use crate::error::AppError;
use crate::manifest::{absolute_path, detect_manifests};
use crate::package_manager::{CommandRunner, SystemCommandRunner};
use crate::progress::Progress;
use crate::updater::PackageUpdater;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Orchestrator for one manifest kind
pub struct Orchestrator {
    /// Run configuration
    config: Config,
    /// Runner used for every package manager invocation
    runner: Arc<dyn CommandRunner>,
    /// Whether to draw a progress bar
    show_progress: bool,
}

impl Orchestrator {
    /// Create an orchestrator that runs the real package manager
    pub fn new(config: Config) -> Self {
        let runner = Arc::new(SystemCommandRunner::new(config.timeout()));
        Self::with_runner(config, runner)
    }

    /// Create an orchestrator with a custom command runner (for testing)
    pub fn with_runner(config: Config, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            config,
            runner,
            show_progress: false,
        }
    }

    /// Enable or disable the progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Returns the run configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Update every manifest below `root` and return the report.
    ///
    /// The report is only produced once every manifest has been attempted;
    /// the first unrecovered error aborts the whole run.
    pub async fn run(&self, root: &Path) -> Result<Report, AppError> {
        let progress = Progress::new(self.show_progress);
        let kind = self.config.kind;

        progress.discovering(root, kind);
        let manifests = match detect_manifests(root, kind) {
            Ok(manifests) => manifests,
            Err(e) => {
                progress.finish();
                return Err(e.into());
            }
        };
        debug!(root = %root.display(), kind = %kind, count = manifests.len(), "discovered manifests");

        let updater = PackageUpdater::new(&self.config, Arc::clone(&self.runner))
            .with_progress(progress.clone());
        let mut report = Report::new(kind);

        progress.start_manifests(manifests.len());
        for relative in manifests {
            progress.begin_manifest(&relative);
            let outcome = match updater.update(&absolute_path(root, &relative)).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    progress.finish();
                    return Err(e);
                }
            };

            for failure in outcome.failures {
                report.add_failure(ToolFailure::new(
                    relative.as_str(),
                    failure.package,
                    failure.reason,
                ));
            }

            if let Some(result) = ManifestUpdateResult::new(relative.as_str(), outcome.updates) {
                info!(manifest = %relative, updates = result.update_count(), "manifest updated");
                report.add_manifest(result);
            }
            progress.manifest_done();
        }
        progress.finish();

        Ok(report)
    }
}
