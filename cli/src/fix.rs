#![deny(missing_docs)]

//! # Fix Command
//!
//! Rewrites spinner markup in the target files.
//!
//! 1. **Targets**: explicit paths, then manifest entries, then scan results (deduplicated).
//! 2. **Rewrite**: each file runs through the catalog and import injection.
//! 3. **Report**: one status line per file, then a summary.

use crate::error::{CliError, CliResult};
use crate::report::{render_json, render_text, OutputFormat};
use crate::targets::{dedup_in_order, load_manifest, scan_dir};
use spinfix_core::{run_batch, BatchReport, RewriteConfig, SourceStore};
use std::path::PathBuf;
use tracing::info;

/// Arguments for the fix command.
#[derive(clap::Args, Debug, Clone)]
pub struct FixArgs {
    /// Files to rewrite, relative to the project root.
    pub paths: Vec<PathBuf>,

    /// Project root. Overrides the manifest's `root`.
    #[clap(long)]
    pub root: Option<PathBuf>,

    /// YAML manifest listing the target files.
    #[clap(long)]
    pub manifest: Option<PathBuf>,

    /// Directory (relative to the root) to scan for target files.
    #[clap(long)]
    pub scan: Option<PathBuf>,

    /// File extensions picked up by `--scan`.
    #[clap(long, value_delimiter = ',', default_values_t = vec!["tsx".to_string(), "jsx".to_string()])]
    pub ext: Vec<String>,

    /// Report what would change without writing any file.
    #[clap(long)]
    pub dry_run: bool,

    /// Output format.
    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Resolves the targets and configuration, then runs the batch.
///
/// # Arguments
///
/// * `args` - Command arguments.
/// * `store` - Where files are read from and written to (use `FsStore` for real runs).
pub fn execute(args: &FixArgs, store: &impl SourceStore) -> CliResult<BatchReport> {
    let manifest = args.manifest.as_deref().map(load_manifest).transpose()?;

    let root = args
        .root
        .clone()
        .or_else(|| manifest.as_ref().and_then(|m| m.root.clone()))
        .unwrap_or_else(|| PathBuf::from("."));

    if args.paths.is_empty() && manifest.is_none() && args.scan.is_none() {
        return Err(CliError::General(
            "No target files: pass paths, --manifest or --scan".into(),
        ));
    }

    let mut paths = args.paths.clone();
    if let Some(manifest) = manifest {
        paths.extend(manifest.files);
    }
    if let Some(dir) = &args.scan {
        paths.extend(scan_dir(&root, dir, &args.ext)?);
    }
    let paths = dedup_in_order(paths);

    info!(root = %root.display(), files = paths.len(), dry_run = args.dry_run, "rewriting spinners");

    let config = RewriteConfig {
        root,
        dry_run: args.dry_run,
        ..RewriteConfig::default()
    };

    Ok(run_batch(&paths, &config, store))
}

/// Renders the report in the requested format.
pub fn render(report: &BatchReport, args: &FixArgs) -> CliResult<String> {
    match args.format {
        OutputFormat::Text => Ok(render_text(report, args.dry_run)),
        OutputFormat::Json => render_json(report),
    }
}
