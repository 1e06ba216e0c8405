//! Core domain models for depbot
//!
//! This module contains the fundamental types used throughout the application:
//! - Manifest kinds (npm, NuGet)
//! - Raw dependencies as declared in a manifest
//! - Per-package updates, per-manifest results and the overall report

mod dependency;
mod kind;
mod report;

pub use dependency::RawDependency;
pub use kind::ManifestKind;
pub use report::{ManifestUpdateResult, PackageUpdate, Report, ToolFailure};
