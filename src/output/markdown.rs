//! Markdown and file-list rendering
//!
//! The markdown groups updates by manifest:
//!
//! ```text
//! ## /a/package.json
//!
//! * **left-pad:** 1.0.0 => 1.1.0
//!
//! ```

use crate::domain::{ManifestKind, Report};
use crate::manifest::absolute_path;
use std::path::{Path, PathBuf};

/// Renders a report for a pull request and a commit
pub struct MarkdownFormatter {
    kind: ManifestKind,
}

impl MarkdownFormatter {
    /// Create a formatter for a manifest kind
    pub fn new(kind: ManifestKind) -> Self {
        Self { kind }
    }

    /// Create a formatter matching the kind of a report
    pub fn for_report(report: &Report) -> Self {
        Self::new(report.kind)
    }

    /// One heading per changed manifest, one bullet per updated package
    pub fn render_markdown(&self, report: &Report) -> String {
        let mut markdown = String::new();
        for manifest in report.manifests() {
            markdown.push_str("## ");
            markdown.push_str(manifest.path());
            markdown.push_str("\n\n");
            for update in manifest.updates() {
                markdown.push_str(&format!(
                    "* **{}:** {} => {}\n",
                    update.name(),
                    update.old_version(),
                    update.new_version()
                ));
            }
            markdown.push('\n');
        }
        markdown
    }

    /// Absolute paths of every changed file, joined by single spaces.
    ///
    /// Kinds with a lock file also list the lock file next to each manifest.
    pub fn render_file_list(&self, report: &Report, root: &Path) -> String {
        self.changed_files(report, root)
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Absolute paths of every changed file, in report order
    pub fn changed_files(&self, report: &Report, root: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for manifest in report.manifests() {
            let path = absolute_path(root, manifest.path());
            let lock = self.kind.lock_filename().map(|name| path.with_file_name(name));
            files.push(path);
            files.extend(lock);
        }
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ManifestUpdateResult, PackageUpdate};

    fn report(kind: ManifestKind, entries: &[(&str, &[(&str, &str, &str)])]) -> Report {
        let mut report = Report::new(kind);
        for (path, updates) in entries {
            let updates = updates
                .iter()
                .map(|(name, old, new)| PackageUpdate::detect(*name, *old, *new).unwrap())
                .collect();
            report.add_manifest(ManifestUpdateResult::new(*path, updates).unwrap());
        }
        report
    }

    #[test]
    fn test_render_markdown() {
        let report = report(
            ManifestKind::Npm,
            &[
                (
                    "/a/package.json",
                    &[("left-pad", "1.0.0", "1.1.0"), ("react", "^18.2.0", "^18.3.1")],
                ),
                ("/b/package.json", &[("lodash", "4.17.20", "4.17.21")]),
            ],
        );

        let markdown = MarkdownFormatter::new(ManifestKind::Npm).render_markdown(&report);
        assert_eq!(
            markdown,
            "## /a/package.json\n\n\
             * **left-pad:** 1.0.0 => 1.1.0\n\
             * **react:** ^18.2.0 => ^18.3.1\n\
             \n\
             ## /b/package.json\n\n\
             * **lodash:** 4.17.20 => 4.17.21\n\
             \n"
        );
    }

    #[test]
    fn test_render_markdown_counts() {
        let report = report(
            ManifestKind::NuGet,
            &[
                ("/src/App/App.csproj", &[("Serilog", "2.12.0", "3.1.1")]),
                (
                    "/tests/App.Tests/App.Tests.csproj",
                    &[("xunit", "2.4.2", "2.6.1"), ("Moq", "4.18.0", "4.20.0")],
                ),
            ],
        );
        let markdown = MarkdownFormatter::for_report(&report).render_markdown(&report);
        assert_eq!(markdown.matches("## ").count(), 2);
        assert_eq!(markdown.lines().filter(|l| l.starts_with("* ")).count(), 3);
        assert!(markdown.contains("* **Moq:** 4.18.0 => 4.20.0\n"));
    }

    #[test]
    fn test_render_markdown_empty_report() {
        let report = Report::new(ManifestKind::Npm);
        assert_eq!(
            MarkdownFormatter::new(ManifestKind::Npm).render_markdown(&report),
            ""
        );
    }

    #[test]
    fn test_file_list_npm_includes_lock_files() {
        let report = report(
            ManifestKind::Npm,
            &[
                ("/a/package.json", &[("left-pad", "1.0.0", "1.1.0")]),
                ("/package.json", &[("react", "^18.2.0", "^18.3.1")]),
            ],
        );
        let files = MarkdownFormatter::new(ManifestKind::Npm)
            .render_file_list(&report, Path::new("/work/repo"));
        assert_eq!(
            files,
            "/work/repo/a/package.json /work/repo/a/package-lock.json \
             /work/repo/package.json /work/repo/package-lock.json"
        );
    }

    #[test]
    fn test_file_list_nuget_manifest_only() {
        let report = report(
            ManifestKind::NuGet,
            &[
                ("/src/App/App.csproj", &[("Serilog", "2.12.0", "3.1.1")]),
                ("/src/Lib/Lib.csproj", &[("Dapper", "2.1.0", "2.1.28")]),
            ],
        );
        let formatter = MarkdownFormatter::new(ManifestKind::NuGet);
        let files = formatter.changed_files(&report, Path::new("/work/repo"));
        assert_eq!(files.len(), 2);
        assert_eq!(
            formatter.render_file_list(&report, Path::new("/work/repo")),
            "/work/repo/src/App/App.csproj /work/repo/src/Lib/Lib.csproj"
        );
    }

    #[test]
    fn test_file_list_empty_report() {
        let report = Report::new(ManifestKind::Npm);
        assert_eq!(
            MarkdownFormatter::new(ManifestKind::Npm).render_file_list(&report, Path::new("/r")),
            ""
        );
    }
}
