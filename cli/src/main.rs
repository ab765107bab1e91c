#![deny(missing_docs)]

//! # Spinfix CLI
//!
//! Command Line Interface for the spinner markup rewriter.
//!
//! Supported Commands:
//! - `fix`: Rewrites spinner markup into canonical Loading components.
//! - `rules`: Lists the rule catalog in priority order.

use clap::{Parser, Subcommand};
use spinfix_core::{Catalog, FsStore};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{CliError, CliResult};
use crate::report::OutputFormat;

mod error;
mod fix;
mod report;
mod targets;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Spinner markup rewriter")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replace spinner markup in the target files.
    Fix(fix::FixArgs),
    /// List the rules in the order they are applied.
    Rules(RulesArgs),
}

/// Arguments for the rules command.
#[derive(clap::Args, Debug, Clone)]
struct RulesArgs {
    /// Output format.
    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Logs go to stderr; stdout carries only status lines and reports.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "spinfix=info,spinfix_core=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn list_rules(args: &RulesArgs) -> CliResult<()> {
    let catalog = Catalog::standard();
    match args.format {
        OutputFormat::Text => {
            for (i, rule) in catalog.rules().iter().enumerate() {
                println!("{}. {}", i + 1, rule);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(catalog.rules())
                .map_err(|e| CliError::General(format!("Failed to serialize rules: {}", e)))?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn main() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    match &cli.command {
        Commands::Fix(args) => {
            let report = fix::execute(args, &FsStore)?;
            println!("{}", fix::render(&report, args)?);
            if report.failed_count() > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Rules(args) => list_rules(args)?,
    }

    Ok(ExitCode::SUCCESS)
}
