//! Application error types using thiserror
//!
//! Error hierarchy:
//! - DiscoveryError: Scan root missing or unreadable
//! - ManifestError: Issues with manifest file reading and parsing
//! - CommandError: Package manager subprocess failures
//! - ConfigError: Issues with configuration

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest discovery errors
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Package manager invocation errors
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while walking the scan root
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// Root directory does not exist
    #[error("directory not found: {path}")]
    RootNotFound { path: PathBuf },

    /// Root path exists but is not a directory
    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// A directory could not be listed
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error (package.json)
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },

    /// XML parsing error (*.csproj)
    #[error("failed to parse XML in {path}: {message}")]
    XmlParseError { path: PathBuf, message: String },

    /// Package is not declared in the manifest
    #[error("package '{package}' not found in {path}")]
    PackageNotFound { package: String, path: PathBuf },
}

/// Errors related to running the external package manager
#[derive(Error, Debug)]
pub enum CommandError {
    /// The program could not be started at all
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program did not exit within the configured timeout
    #[error("'{program}' timed out after {}s while updating '{package}'", .timeout.as_secs())]
    Timeout {
        program: String,
        package: String,
        timeout: Duration,
    },

    /// The program exited with a non-zero status
    #[error("'{program}' failed while updating '{package}' (exit code {})", display_code(.code))]
    Failed {
        program: String,
        package: String,
        code: Option<i32>,
    },
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none".to_string(),
    }
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file
    #[error("failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// Unknown manifest kind
    #[error("invalid manifest kind '{value}': expected 'npm' or 'nuget'")]
    InvalidKind { value: String },
}

impl DiscoveryError {
    /// Creates a new RootNotFound error
    pub fn root_not_found(path: impl Into<PathBuf>) -> Self {
        DiscoveryError::RootNotFound { path: path.into() }
    }

    /// Creates a new NotADirectory error
    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        DiscoveryError::NotADirectory { path: path.into() }
    }

    /// Creates a new ReadDir error
    pub fn read_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DiscoveryError::ReadDir {
            path: path.into(),
            source,
        }
    }
}

impl ManifestError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new XmlParseError
    pub fn xml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::XmlParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        ManifestError::PackageNotFound {
            package: package.into(),
            path: path.into(),
        }
    }
}

impl CommandError {
    /// Creates a new Spawn error
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        CommandError::Spawn {
            program: program.into(),
            source,
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(
        program: impl Into<String>,
        package: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        CommandError::Timeout {
            program: program.into(),
            package: package.into(),
            timeout,
        }
    }

    /// Creates a new Failed error
    pub fn failed(program: impl Into<String>, package: impl Into<String>, code: Option<i32>) -> Self {
        CommandError::Failed {
            program: program.into(),
            package: package.into(),
            code,
        }
    }
}
