//! CLI argument parsing module for depbot

use crate::config::Config;
use crate::domain::ManifestKind;
use crate::error::ConfigError;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

fn parse_kind(s: &str) -> Result<ManifestKind, String> {
    s.parse().map_err(|e: ConfigError| e.to_string())
}

/// Dependency updater for CI pipelines
#[derive(Parser, Debug, Clone)]
#[command(
    name = "depbot",
    version,
    about = "Update npm and NuGet dependencies and summarise the changes"
)]
pub struct CliArgs {
    /// Root directory to search for manifests
    pub path: PathBuf,

    /// Manifest kind to update: npm or nuget
    #[arg(short, long, value_parser = parse_kind)]
    pub kind: Option<ManifestKind>,

    /// Configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Timeout for a single package manager invocation, in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Abort the run when a package manager invocation fails
    #[arg(long)]
    pub fail_on_tool_error: bool,

    /// Exclude specific packages from update (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Update only specific packages (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub only: Vec<String>,

    /// Write the markdown summary to this file instead of stdout
    #[arg(long)]
    pub markdown_out: Option<PathBuf>,

    /// Write the space-separated list of changed files to this file
    #[arg(long)]
    pub files_out: Option<PathBuf>,

    /// Output the report, markdown and file list as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - no progress display
    #[arg(short, long)]
    pub quiet: bool,
}

impl CliArgs {
    /// Build the run configuration: config file first, then CLI overrides
    pub fn to_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(kind) = self.kind {
            config.kind = kind;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if self.fail_on_tool_error {
            config.fail_on_tool_error = true;
        }
        if !self.only.is_empty() {
            config.only = self.only.clone();
        }
        if !self.exclude.is_empty() {
            config.exclude = self.exclude.clone();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::parse_from(args)
    }

    #[test]
    fn test_path_is_required() {
        assert!(CliArgs::try_parse_from(["depbot"]).is_err());
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["depbot", "/repo"]);
        assert_eq!(args.path, PathBuf::from("/repo"));
        assert!(args.kind.is_none());
        assert!(!args.json);
        assert!(!args.verbose);
        assert!(!args.quiet);

        let config = args.to_config().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_kind_flag() {
        let args = parse(&["depbot", "/repo", "--kind", "nuget"]);
        assert_eq!(args.kind, Some(ManifestKind::NuGet));
        assert_eq!(args.to_config().unwrap().tool(), "dotnet");
    }

    #[test]
    fn test_invalid_kind() {
        let result = CliArgs::try_parse_from(["depbot", "/repo", "--kind", "maven"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides() {
        let args = parse(&[
            "depbot",
            "/repo",
            "--timeout",
            "30",
            "--fail-on-tool-error",
            "--exclude",
            "lodash",
            "--exclude",
            "react",
        ]);
        let config = args.to_config().unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.fail_on_tool_error);
        assert_eq!(config.exclude, vec!["lodash", "react"]);
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("depbot.toml");
        std::fs::write(&config_path, "kind = \"nuget\"\ntimeout-secs = 60\n").unwrap();

        let args = parse(&[
            "depbot",
            "/repo",
            "--config",
            config_path.to_str().unwrap(),
            "--timeout",
            "10",
        ]);
        let config = args.to_config().unwrap();
        assert_eq!(config.kind, ManifestKind::NuGet);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_missing_config_file() {
        let args = parse(&["depbot", "/repo", "--config", "/nonexistent/depbot.toml"]);
        assert!(args.to_config().is_err());
    }

    #[test]
    fn test_output_flags() {
        let args = parse(&[
            "depbot",
            "/repo",
            "--markdown-out",
            "summary.md",
            "--files-out",
            "files.txt",
            "--json",
            "-q",
        ]);
        assert_eq!(args.markdown_out, Some(PathBuf::from("summary.md")));
        assert_eq!(args.files_out, Some(PathBuf::from("files.txt")));
        assert!(args.json);
        assert!(args.quiet);
    }
}
