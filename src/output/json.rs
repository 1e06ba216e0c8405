//! JSON output formatter for machine processing
//!
//! Bundles the report together with the rendered markdown and file list so
//! a pipeline can pick whichever piece it needs.

use crate::domain::Report;
use crate::output::MarkdownFormatter;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Whether to pretty-print
    pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Write the report for `root` as a single JSON document
    pub fn format(&self, report: &Report, root: &Path, writer: &mut dyn Write) -> std::io::Result<()> {
        let markdown = MarkdownFormatter::for_report(report);
        let output = JsonOutput {
            root: root.display().to_string(),
            report,
            markdown: markdown.render_markdown(report),
            files: markdown.render_file_list(report, root),
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &output)?;
        } else {
            serde_json::to_writer(&mut *writer, &output)?;
        }
        writeln!(writer)
    }
}

/// JSON representation of a finished run
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Scan root
    root: String,
    /// The report itself
    #[serde(flatten)]
    report: &'a Report,
    /// Rendered markdown summary
    markdown: String,
    /// Space-separated changed files
    files: String,
}
