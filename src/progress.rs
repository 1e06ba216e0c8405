//! Progress display for an update run
//!
//! One indicatif bar lives for the whole run: a spinner while manifests are
//! discovered, then a bar over the manifests whose prefix is the manifest
//! being processed and whose message is the package being updated. The
//! handle is cheap to clone so the updater can tick it per package.

use crate::domain::ManifestKind;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Progress reporter shared by the orchestrator and the updater
#[derive(Clone)]
pub struct Progress {
    bar: ProgressBar,
}

impl Progress {
    /// Create a reporter; a disabled one draws nothing but keeps counting
    pub fn new(enabled: bool) -> Self {
        let bar = if enabled {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        Self { bar }
    }

    /// Spinner shown while walking the scan root
    pub fn discovering(&self, root: &Path, kind: ManifestKind) {
        self.bar.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .expect("Invalid template"),
        );
        self.bar
            .set_message(format!("Looking for {} manifests in {}", kind, root.display()));
        self.bar.enable_steady_tick(Duration::from_millis(80));
    }

    /// Switch to a bar over `total` manifests
    pub fn start_manifests(&self, total: usize) {
        self.bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{pos}/{len}] {prefix:.bold} {wide_msg:.dim}")
                .expect("Invalid template"),
        );
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
        self.bar.set_message("");
    }

    /// Show the manifest now being processed
    pub fn begin_manifest(&self, relative: &str) {
        self.bar.set_prefix(relative.to_string());
        self.bar.set_message("");
    }

    /// Show the package whose update command is running
    pub fn package(&self, name: &str) {
        self.bar.set_message(format!("updating {}", name));
        self.bar.tick();
    }

    /// Count the current manifest as done
    pub fn manifest_done(&self) {
        self.bar.inc(1);
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
