//! # Status Reporting
//!
//! Renders a batch report as one status line per file plus a summary, or as JSON.

use crate::error::{CliError, CliResult};
use spinfix_core::{BatchReport, FileResult, FileStatus};

/// How results are printed to stdout.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable status lines.
    #[default]
    Text,
    /// The full report as JSON.
    Json,
}

/// One status line for one file.
pub fn status_line(result: &FileResult, dry_run: bool) -> String {
    let path = result.path.display();
    match &result.status {
        FileStatus::Changed {
            replacements,
            import_added,
        } => {
            let verb = if dry_run { "would change" } else { "changed" };
            let noun = if *replacements == 1 { "spinner" } else { "spinners" };
            let import = if *import_added { ", import added" } else { "" };
            format!("{}: {} ({} {}{})", verb, path, replacements, noun, import)
        }
        FileStatus::Skipped => format!("skipped: {} (no spinners found)", path),
        FileStatus::Failed { error } => format!("failed: {}: {}", path, error),
    }
}

/// Status lines followed by the summary line.
pub fn render_text(report: &BatchReport, dry_run: bool) -> String {
    let mut out = String::new();
    for result in &report.results {
        out.push_str(&status_line(result, dry_run));
        out.push('\n');
    }
    let verb = if dry_run { "Would change" } else { "Changed" };
    out.push_str(&format!(
        "\nDone. {} {} of {} files ({} skipped, {} failed).",
        verb,
        report.changed_count(),
        report.results.len(),
        report.skipped_count(),
        report.failed_count()
    ));
    out
}

/// Pretty-printed JSON report.
pub fn render_json(report: &BatchReport) -> CliResult<String> {
    serde_json::to_string_pretty(report)
        .map_err(|e| CliError::General(format!("Failed to serialize report: {}", e)))
}
