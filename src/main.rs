//! depbot - dependency updater for CI pipelines
//!
//! Updates every package declared in npm or NuGet manifests below a root
//! directory and prints a markdown summary of what changed.

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use depbot::cli::CliArgs;
use depbot::domain::Report;
use depbot::orchestrator::Orchestrator;
use depbot::output::{JsonFormatter, MarkdownFormatter};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let root = resolve_root(&args.path);
    let orchestrator = Orchestrator::new(args.to_config()?).with_progress(!args.quiet);

    if args.verbose {
        let config = orchestrator.config();
        eprintln!("depbot v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Target: {}", root.display());
        eprintln!("Kind: {} (using '{}')", config.kind, config.tool());
    }

    let report = orchestrator.run(&root).await?;

    publish(&args, &root, &report)?;

    for failure in report.failures() {
        eprintln!(
            "{} {} in {}: {}",
            "warning:".yellow().bold(),
            failure.package,
            failure.path,
            failure.reason
        );
    }

    if args.verbose {
        eprintln!(
            "{} {} ({} package(s) in {} file(s))",
            "Succeeded:".green().bold(),
            root.display(),
            report.total_updates(),
            report.manifests().len()
        );
    }

    if report.has_failures() {
        // Partial success - some packages could not be updated
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Absolute form of the scan root, so the file list holds absolute paths.
///
/// A root that cannot be resolved is passed through unchanged and reported
/// by discovery.
fn resolve_root(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Hand the markdown and the changed file list to the pipeline
fn publish(args: &CliArgs, root: &Path, report: &Report) -> anyhow::Result<()> {
    let formatter = MarkdownFormatter::for_report(report);
    let markdown = formatter.render_markdown(report);
    let files = formatter.render_file_list(report, root);

    if let Some(path) = &args.markdown_out {
        std::fs::write(path, &markdown)
            .with_context(|| format!("failed to write markdown to {}", path.display()))?;
    }
    if let Some(path) = &args.files_out {
        std::fs::write(path, &files)
            .with_context(|| format!("failed to write file list to {}", path.display()))?;
    }

    let mut stdout = io::stdout().lock();
    if args.json {
        JsonFormatter::new(true).format(report, root, &mut stdout)?;
    } else if args.markdown_out.is_none() {
        write!(stdout, "{}", markdown)?;
    }
    stdout.flush()?;

    if args.verbose && !files.is_empty() {
        eprintln!("Changed files: {}", files);
    }

    Ok(())
}
