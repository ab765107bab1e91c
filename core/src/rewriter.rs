#![deny(missing_docs)]

//! # File Rewriter
//!
//! Runs the catalog over each target file, injects the component import when
//! anything changed, and writes the file back.
//!
//! 1. **Read**: the whole file, as UTF-8.
//! 2. **Rewrite**: catalog pass, then import injection.
//! 3. **Write**: one write per changed file, none for unchanged files.
//!
//! A failing file is reported and the batch moves on.

use crate::catalog::Catalog;
use crate::error::{AppError, AppResult};
use crate::imports::{add_import, ImportSpec};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Explicit configuration for a batch run.
#[derive(Debug, Clone)]
pub struct RewriteConfig {
    /// Rules to apply.
    pub catalog: Catalog,
    /// Import required by the canonical components.
    pub import: ImportSpec,
    /// Relative target paths resolve against this directory.
    pub root: PathBuf,
    /// Compute results without writing anything.
    pub dry_run: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            catalog: Catalog::standard(),
            import: ImportSpec::default(),
            root: PathBuf::from("."),
            dry_run: false,
        }
    }
}

/// Where file contents come from and go to.
///
/// Abstracted so tests can observe reads and writes without a filesystem.
pub trait SourceStore {
    /// Reads the whole file as UTF-8.
    fn read(&self, path: &Path) -> AppResult<String>;
    /// Replaces the whole file.
    fn write(&self, path: &Path, contents: &str) -> AppResult<()>;
}

/// Standard store backed by `std::fs`.
pub struct FsStore;

impl SourceStore for FsStore {
    fn read(&self, path: &Path) -> AppResult<String> {
        fs::read_to_string(path).map_err(|source| AppError::Read {
            path: path.display().to_string(),
            source,
        })
    }

    fn write(&self, path: &Path, contents: &str) -> AppResult<()> {
        fs::write(path, contents).map_err(|source| AppError::Write {
            path: path.display().to_string(),
            source,
        })
    }
}

/// In-memory result of rewriting one file's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRewrite {
    /// The full new text.
    pub text: String,
    /// Number of spinner elements replaced.
    pub replacements: usize,
    /// Whether the import declaration was inserted.
    pub import_added: bool,
}

/// Rewrites `source` in memory.
///
/// Returns `None` when no rule matched; the text is then left exactly as it was.
pub fn rewrite_source(source: &str, config: &RewriteConfig) -> AppResult<Option<SourceRewrite>> {
    let outcome = config.catalog.apply(source);
    if !outcome.changed() {
        return Ok(None);
    }

    let replacements = outcome.replacements();
    let components = outcome.components();
    let symbols: Vec<&str> = components.iter().map(|c| c.name()).collect();

    let (text, import_added) = match add_import(&outcome.text, &config.import, &symbols)? {
        Some(text) => (text, true),
        None => (outcome.text, false),
    };

    Ok(Some(SourceRewrite {
        text,
        replacements,
        import_added,
    }))
}

/// Outcome category of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    /// Spinners were replaced (and written, unless dry-run).
    Changed {
        /// Number of spinner elements replaced.
        replacements: usize,
        /// Whether the import declaration was inserted.
        import_added: bool,
    },
    /// No recognizable spinner markup; nothing written.
    Skipped,
    /// The file could not be read or written.
    Failed {
        /// Operator-facing error message.
        error: String,
    },
}

/// Per-file report entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileResult {
    /// Path as given by the caller.
    pub path: PathBuf,
    /// What happened.
    #[serde(flatten)]
    pub status: FileStatus,
}

impl FileResult {
    /// Whether the file was changed.
    pub fn changed(&self) -> bool {
        matches!(self.status, FileStatus::Changed { .. })
    }

    /// The failure message, if the file failed.
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            FileStatus::Failed { error } => Some(error.as_str()),
            _ => None,
        }
    }
}

/// Results of a whole batch, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// One entry per processed file.
    pub results: Vec<FileResult>,
}

impl BatchReport {
    /// Number of changed files.
    pub fn changed_count(&self) -> usize {
        self.results.iter().filter(|r| r.changed()).count()
    }

    /// Number of skipped files.
    pub fn skipped_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.status == FileStatus::Skipped)
            .count()
    }

    /// Number of failed files.
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| r.error().is_some()).count()
    }
}

/// Rewrites one file and reports what happened. Never returns an error.
pub fn rewrite_file(path: &Path, config: &RewriteConfig, store: &impl SourceStore) -> FileResult {
    let status = match process(path, config, store) {
        Ok(Some(rewrite)) => FileStatus::Changed {
            replacements: rewrite.replacements,
            import_added: rewrite.import_added,
        },
        Ok(None) => FileStatus::Skipped,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "file failed");
            FileStatus::Failed {
                error: e.to_string(),
            }
        }
    };

    FileResult {
        path: path.to_path_buf(),
        status,
    }
}

fn process(
    path: &Path,
    config: &RewriteConfig,
    store: &impl SourceStore,
) -> AppResult<Option<SourceRewrite>> {
    let full_path = config.root.join(path);
    let content = store.read(&full_path)?;

    let Some(rewrite) = rewrite_source(&content, config)? else {
        debug!(path = %path.display(), "no spinners found");
        return Ok(None);
    };

    if config.dry_run {
        debug!(path = %path.display(), "dry run, not writing");
    } else {
        store.write(&full_path, &rewrite.text)?;
    }

    Ok(Some(rewrite))
}

/// Processes `paths` one at a time, in order.
///
/// A failure in one file never stops the rest of the batch.
pub fn run_batch(paths: &[PathBuf], config: &RewriteConfig, store: &impl SourceStore) -> BatchReport {
    let results = paths
        .iter()
        .map(|path| rewrite_file(path, config, store))
        .collect();
    BatchReport { results }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io::{Error, ErrorKind};

    /// In-memory store that records every write.
    #[derive(Default)]
    struct MemoryStore {
        files: RefCell<HashMap<PathBuf, String>>,
        writes: RefCell<Vec<PathBuf>>,
        read_only: bool,
    }

    impl MemoryStore {
        fn with(files: &[(&str, &str)]) -> Self {
            let store = MemoryStore::default();
            for (path, text) in files {
                store
                    .files
                    .borrow_mut()
                    .insert(Path::new(".").join(path), text.to_string());
            }
            store
        }

        fn get(&self, path: &str) -> String {
            self.files.borrow()[&Path::new(".").join(path)].clone()
        }
    }

    impl SourceStore for MemoryStore {
        fn read(&self, path: &Path) -> AppResult<String> {
            self.files
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| AppError::Read {
                    path: path.display().to_string(),
                    source: Error::new(ErrorKind::NotFound, "not found"),
                })
        }

        fn write(&self, path: &Path, contents: &str) -> AppResult<()> {
            if self.read_only {
                return Err(AppError::Write {
                    path: path.display().to_string(),
                    source: Error::new(ErrorKind::PermissionDenied, "read-only"),
                });
            }
            self.writes.borrow_mut().push(path.to_path_buf());
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), contents.to_string());
            Ok(())
        }
    }

    const SPINNER_PAGE: &str = "import React from 'react';\n\nexport default function Page() {\n  return <div className=\"animate-spin rounded-full h-10 w-10 border-b-2 border-blue-500\"></div>;\n}\n";

    #[test]
    fn test_rewrite_source_none_when_nothing_matches() {
        let res = rewrite_source("const a = 1;\n", &RewriteConfig::default()).unwrap();
        assert_eq!(res, None);
    }

    #[test]
    fn test_import_names_only_used_components() {
        let code = "import React from 'react';\n<div className=\"animate-spin rounded-full h-4 w-4\" />\n";
        let res = rewrite_source(code, &RewriteConfig::default()).unwrap().unwrap();
        assert!(res
            .text
            .contains("import { LoadingInline } from \"@/components/ui/Loading\";"));
        assert!(res.import_added);
        assert_eq!(res.replacements, 1);
    }

    #[test]
    fn test_changed_file_written_once() {
        let store = MemoryStore::with(&[("page.tsx", SPINNER_PAGE)]);
        let result = rewrite_file(Path::new("page.tsx"), &RewriteConfig::default(), &store);

        assert_eq!(
            result.status,
            FileStatus::Changed {
                replacements: 1,
                import_added: true
            }
        );
        assert_eq!(store.writes.borrow().len(), 1);
        assert!(store.get("page.tsx").contains("<LoadingCentered size=\"lg\" />"));
    }

    #[test]
    fn test_second_run_skips_without_writing() {
        let store = MemoryStore::with(&[("page.tsx", SPINNER_PAGE)]);
        let config = RewriteConfig::default();
        rewrite_file(Path::new("page.tsx"), &config, &store);
        let after_first = store.get("page.tsx");

        let second = rewrite_file(Path::new("page.tsx"), &config, &store);
        assert_eq!(second.status, FileStatus::Skipped);
        assert_eq!(store.writes.borrow().len(), 1);
        assert_eq!(store.get("page.tsx"), after_first);
    }

    #[test]
    fn test_dry_run_never_writes() {
        let store = MemoryStore::with(&[("page.tsx", SPINNER_PAGE)]);
        let config = RewriteConfig {
            dry_run: true,
            ..RewriteConfig::default()
        };
        let result = rewrite_file(Path::new("page.tsx"), &config, &store);
        assert!(result.changed());
        assert!(store.writes.borrow().is_empty());
        assert_eq!(store.get("page.tsx"), SPINNER_PAGE);
    }

    #[test]
    fn test_batch_continues_past_failures() {
        let store = MemoryStore::with(&[("a.tsx", SPINNER_PAGE), ("c.tsx", "const c = 1;\n")]);
        let paths = vec![
            PathBuf::from("a.tsx"),
            PathBuf::from("missing.tsx"),
            PathBuf::from("c.tsx"),
        ];
        let report = run_batch(&paths, &RewriteConfig::default(), &store);

        assert_eq!(report.results.len(), 3);
        assert!(report.results[0].changed());
        assert!(report.results[1].error().unwrap().contains("missing.tsx"));
        assert_eq!(report.results[2].status, FileStatus::Skipped);
        assert_eq!(report.changed_count(), 1);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.failed_count(), 1);
    }

    #[test]
    fn test_write_failure_leaves_file_untouched() {
        let mut store = MemoryStore::with(&[("page.tsx", SPINNER_PAGE)]);
        store.read_only = true;
        let result = rewrite_file(Path::new("page.tsx"), &RewriteConfig::default(), &store);
        assert!(result.error().unwrap().starts_with("Failed to write"));
        assert_eq!(store.get("page.tsx"), SPINNER_PAGE);
    }

    #[test]
    fn test_report_serializes_flat_status() {
        let report = BatchReport {
            results: vec![
                FileResult {
                    path: PathBuf::from("a.tsx"),
                    status: FileStatus::Skipped,
                },
                FileResult {
                    path: PathBuf::from("b.tsx"),
                    status: FileStatus::Changed {
                        replacements: 2,
                        import_added: false,
                    },
                },
            ],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["results"][0]["status"], "skipped");
        assert_eq!(json["results"][1]["path"], "b.tsx");
        assert_eq!(json["results"][1]["replacements"], 2);
    }
}
