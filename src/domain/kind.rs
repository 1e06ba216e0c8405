//! Manifest kind definitions for supported package ecosystems

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported manifest kinds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ManifestKind {
    /// npm package manifests (package.json)
    #[default]
    Npm,
    /// NuGet project files (*.csproj)
    NuGet,
}

impl ManifestKind {
    /// Returns the path suffix used to discover manifests of this kind
    pub fn manifest_suffix(&self) -> &'static str {
        match self {
            ManifestKind::Npm => "package.json",
            ManifestKind::NuGet => ".csproj",
        }
    }

    /// Returns the lock file that travels with the manifest, if any
    pub fn lock_filename(&self) -> Option<&'static str> {
        match self {
            ManifestKind::Npm => Some("package-lock.json"),
            ManifestKind::NuGet => None,
        }
    }

    /// Returns the package manager executable used when none is configured
    pub fn default_tool(&self) -> &'static str {
        match self {
            ManifestKind::Npm => "npm",
            ManifestKind::NuGet => "dotnet",
        }
    }

    /// Returns the display name for this kind
    pub fn display_name(&self) -> &'static str {
        match self {
            ManifestKind::Npm => "npm",
            ManifestKind::NuGet => "NuGet",
        }
    }
}

impl fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ManifestKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "npm" | "node" => Ok(ManifestKind::Npm),
            "nuget" | "dotnet" => Ok(ManifestKind::NuGet),
            _ => Err(ConfigError::InvalidKind {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ManifestKind {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
