//! depbot - dependency updater library for CI pipelines
//!
//! This library finds manifest files below a root directory, asks the
//! package manager to update every declared package, and reports which
//! declared versions changed:
//! - npm (package.json, with package-lock.json)
//! - NuGet (*.csproj)

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod filter;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod package_manager;
pub mod progress;
pub mod updater;
