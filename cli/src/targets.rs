#![deny(missing_docs)]

//! # Target Collection
//!
//! Builds the ordered list of files to rewrite from explicit paths, a YAML
//! manifest and/or a directory scan.
//!
//! Manifest format:
//!
//! ```yaml
//! root: ../kars        # optional, relative to the manifest file
//! files:
//!   - src/app/page.tsx
//!   - src/components/stock/StockTable.tsx
//! ```

use crate::error::{CliError, CliResult};
use serde::Deserialize;
use spinfix_core::AppError;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directories never descended into by a scan.
const SKIP_DIRS: &[&str] = &["node_modules", ".git", ".next", "dist", "build"];

/// A static list of target files.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Project root the files are relative to.
    #[serde(default)]
    pub root: Option<PathBuf>,
    /// Target files, in processing order.
    pub files: Vec<PathBuf>,
}

/// Loads a manifest, resolving its `root` against the manifest's own directory.
pub fn load_manifest(path: &Path) -> CliResult<Manifest> {
    let content = fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let mut manifest: Manifest = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Manifest(format!("{}: {}", path.display(), e)))?;

    if let Some(root) = &manifest.root {
        if root.is_relative() {
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            manifest.root = Some(base.join(root));
        }
    }

    Ok(manifest)
}

/// Recursively finds files under `root/dir` whose extension is in `extensions`.
///
/// Returned paths are relative to `root` and sorted by walk order (file name).
pub fn scan_dir(root: &Path, dir: &Path, extensions: &[String]) -> CliResult<Vec<PathBuf>> {
    let start = root.join(dir);
    if !start.is_dir() {
        return Err(CliError::General(format!(
            "Scan directory not found: {:?}",
            start
        )));
    }

    let walker = WalkDir::new(&start)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            !(e.depth() > 0 && e.file_type().is_dir() && SKIP_DIRS.iter().any(|s| name == *s))
        });

    let mut found = Vec::new();
    for entry in walker.filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let wanted = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|x| x == ext));
        if wanted {
            found.push(path.strip_prefix(root).unwrap_or(path).to_path_buf());
        }
    }

    Ok(found)
}

/// Removes repeated paths, keeping the first occurrence.
pub fn dedup_in_order(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = std::collections::HashSet::new();
    paths
        .into_iter()
        .filter(|p| seen.insert(p.clone()))
        .collect()
}
