//! Package manager integration for updating a single package
//!
//! This module provides:
//! - Construction of the per-package update command for each manifest kind
//! - Execution of that command with a timeout

use crate::domain::ManifestKind;
use crate::error::CommandError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Default time a single update command may run
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// A fully described package manager invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCommand {
    /// Executable to run
    pub program: String,
    /// Arguments passed to the executable
    pub args: Vec<String>,
    /// Directory the command runs in (the manifest's directory)
    pub working_dir: PathBuf,
    /// Manifest being updated
    pub manifest: PathBuf,
    /// Package being updated
    pub package: String,
}

impl UpdateCommand {
    /// Build the update command for one package of a manifest.
    ///
    /// - npm: `<program> update <package>`
    /// - NuGet: `<program> add <manifest> package <package>`
    pub fn for_package(kind: ManifestKind, program: &str, manifest: &Path, package: &str) -> Self {
        let args = match kind {
            ManifestKind::Npm => vec!["update".to_string(), package.to_string()],
            ManifestKind::NuGet => vec![
                "add".to_string(),
                manifest.display().to_string(),
                "package".to_string(),
                package.to_string(),
            ],
        };

        let working_dir = manifest
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            program: program.to_string(),
            args,
            working_dir,
            manifest: manifest.to_path_buf(),
            package: package.to_string(),
        }
    }

    /// Command line for display and logging
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Result of a finished package manager invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the command exited with status zero
    pub success: bool,
    /// Exit code, if the process exited normally
    pub code: Option<i32>,
    /// Standard output from the command
    pub stdout: String,
    /// Standard error from the command
    pub stderr: String,
}

impl CommandOutput {
    /// Create a successful output
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failed output
    pub fn failure(code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Trait for running package manager update commands
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the command to completion.
    ///
    /// A non-zero exit status is reported through [`CommandOutput::success`];
    /// errors are reserved for commands that could not run or finish.
    async fn run(&self, command: &UpdateCommand) -> Result<CommandOutput, CommandError>;
}

/// Runner that executes real commands as subprocesses
#[derive(Debug, Clone)]
pub struct SystemCommandRunner {
    timeout: Duration,
}

impl SystemCommandRunner {
    /// Create a runner with the given per-command timeout
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Returns the per-command timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for SystemCommandRunner {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, command: &UpdateCommand) -> Result<CommandOutput, CommandError> {
        let child = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CommandError::spawn(&command.program, e))?;

        // Dropping the future on timeout kills the child
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| CommandError::spawn(&command.program, e))?,
            Err(_) => {
                return Err(CommandError::timeout(
                    &command.program,
                    &command.package,
                    self.timeout,
                ))
            }
        };

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_npm_update_command() {
        let manifest = Path::new("/repo/web/package.json");
        let cmd = UpdateCommand::for_package(ManifestKind::Npm, "npm", manifest, "left-pad");

        assert_eq!(cmd.program, "npm");
        assert_eq!(cmd.args, vec!["update", "left-pad"]);
        assert_eq!(cmd.working_dir, PathBuf::from("/repo/web"));
        assert_eq!(cmd.package, "left-pad");
        assert_eq!(cmd.display(), "npm update left-pad");
    }

    #[test]
    fn test_nuget_update_command() {
        let manifest = Path::new("/repo/src/App/App.csproj");
        let cmd = UpdateCommand::for_package(ManifestKind::NuGet, "dotnet", manifest, "Serilog");

        assert_eq!(cmd.program, "dotnet");
        assert_eq!(
            cmd.args,
            vec!["add", "/repo/src/App/App.csproj", "package", "Serilog"]
        );
        assert_eq!(cmd.working_dir, PathBuf::from("/repo/src/App"));
    }

    #[test]
    fn test_custom_program() {
        let manifest = Path::new("/repo/package.json");
        let cmd = UpdateCommand::for_package(
            ManifestKind::Npm,
            "/opt/node/bin/npm",
            manifest,
            "react",
        );
        assert_eq!(cmd.program, "/opt/node/bin/npm");
    }

    #[test]
    fn test_command_output_constructors() {
        let ok = CommandOutput::success("done");
        assert!(ok.success);
        assert_eq!(ok.code, Some(0));

        let failed = CommandOutput::failure(Some(1), "boom");
        assert!(!failed.success);
        assert_eq!(failed.stderr, "boom");
    }

    #[test]
    fn test_system_runner_default_timeout() {
        assert_eq!(SystemCommandRunner::default().timeout(), DEFAULT_TIMEOUT);
    }

    #[cfg(unix)]
    fn shell_command(dir: &Path, script: &str) -> UpdateCommand {
        UpdateCommand {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
            working_dir: dir.to_path_buf(),
            manifest: dir.join("package.json"),
            package: "left-pad".to_string(),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_success() {
        let temp_dir = tempfile::tempdir().unwrap();
        let runner = SystemCommandRunner::new(Duration::from_secs(10));
        let output = runner
            .run(&shell_command(temp_dir.path(), "echo updated"))
            .await
            .unwrap();
        assert!(output.success);
        assert_eq!(output.stdout.trim(), "updated");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_runs_in_working_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let runner = SystemCommandRunner::new(Duration::from_secs(10));
        runner
            .run(&shell_command(temp_dir.path(), "touch marker"))
            .await
            .unwrap();
        assert!(temp_dir.path().join("marker").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_non_zero_exit() {
        let temp_dir = tempfile::tempdir().unwrap();
        let runner = SystemCommandRunner::new(Duration::from_secs(10));
        let output = runner
            .run(&shell_command(temp_dir.path(), "echo oops >&2; exit 3"))
            .await
            .unwrap();
        assert!(!output.success);
        assert_eq!(output.code, Some(3));
        assert_eq!(output.stderr.trim(), "oops");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_timeout() {
        let temp_dir = tempfile::tempdir().unwrap();
        let runner = SystemCommandRunner::new(Duration::from_millis(100));
        let err = runner
            .run(&shell_command(temp_dir.path(), "sleep 5"))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_system_runner_missing_program() {
        let temp_dir = tempfile::tempdir().unwrap();
        let runner = SystemCommandRunner::default();
        let cmd = UpdateCommand {
            program: "depbot-no-such-program".to_string(),
            args: Vec::new(),
            working_dir: temp_dir.path().to_path_buf(),
            manifest: temp_dir.path().join("package.json"),
            package: "left-pad".to_string(),
        };
        let err = runner.run(&cmd).await.unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
    }
}
