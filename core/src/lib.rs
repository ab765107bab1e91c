#![deny(missing_docs)]

//! # Spinfix Core
//!
//! Core library for rewriting hand-rolled spinner markup into the canonical
//! `LoadingCentered` / `LoadingInline` components.

/// Shared error types.
pub mod error;

/// Spinner rules and the tiered pass that applies them.
pub mod catalog;

/// Import declaration injection.
pub mod imports;

/// Per-file and batch rewriting.
pub mod rewriter;

pub use catalog::{Catalog, CatalogOutcome, Component, Rule, RuleHit, Tier};
pub use error::{AppError, AppResult};
pub use imports::{add_import, ImportSpec, LOADING_MODULE};
pub use rewriter::{
    rewrite_file, rewrite_source, run_batch, BatchReport, FileResult, FileStatus, FsStore,
    RewriteConfig, SourceRewrite, SourceStore,
};
