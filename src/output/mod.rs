//! Output formatting for update reports
//!
//! This module provides:
//! - Markdown summary for pull request descriptions
//! - Space-separated list of changed files for committing
//! - JSON output for machine processing

mod json;
mod markdown;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
