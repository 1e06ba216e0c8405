//! Run configuration
//!
//! Settings come from an optional TOML file and are then overridden by CLI
//! flags. The core only ever sees an explicit `Config`; it never reads
//! environment variables or other process-wide state.
//!
//! ```toml
//! kind = "nuget"
//! dotnet-command = "/usr/share/dotnet/dotnet"
//! timeout-secs = 120
//! fail-on-tool-error = true
//! exclude = ["Newtonsoft.Json"]
//! ```

use crate::domain::ManifestKind;
use crate::error::ConfigError;
use crate::filter::UpdateFilter;
use crate::package_manager::DEFAULT_TIMEOUT;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Configuration for one update run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Manifest kind to update
    pub kind: ManifestKind,
    /// npm executable (defaults to `npm` on PATH)
    pub npm_command: Option<String>,
    /// dotnet executable (defaults to `dotnet` on PATH)
    pub dotnet_command: Option<String>,
    /// Timeout for a single update command, in seconds
    pub timeout_secs: u64,
    /// Abort the run when an update command fails instead of recording it
    pub fail_on_tool_error: bool,
    /// If non-empty, only update these packages
    pub only: Vec<String>,
    /// Packages never to update
    pub exclude: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kind: ManifestKind::default(),
            npm_command: None,
            dotnet_command: None,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            fail_on_tool_error: false,
            only: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

impl Config {
    /// Create a default configuration for a manifest kind
    pub fn for_kind(kind: ManifestKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content, path)
    }

    /// Parse configuration from TOML text; `path` is used for error messages
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Executable to run for the configured kind
    pub fn tool(&self) -> &str {
        let configured = match self.kind {
            ManifestKind::Npm => self.npm_command.as_deref(),
            ManifestKind::NuGet => self.dotnet_command.as_deref(),
        };
        configured.unwrap_or_else(|| self.kind.default_tool())
    }

    /// Per-command timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Package filter built from `only` and `exclude`
    pub fn filter(&self) -> UpdateFilter {
        UpdateFilter::new()
            .with_only(self.only.clone())
            .with_exclude(self.exclude.clone())
    }
}
