//! # Import Injection
//!
//! Ensures a file that now references the canonical components imports them
//! exactly once, without touching the imports already there.

use crate::error::{AppError, AppResult};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Module path the canonical components are exported from.
pub const LOADING_MODULE: &str = "@/components/ui/Loading";

/// The import a rewritten file must carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// Module specifier, without quotes.
    pub module: String,
}

impl ImportSpec {
    /// Creates a spec for `module`.
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
        }
    }

    /// Renders `import { A, B } from "module";`.
    pub fn declaration(&self, symbols: &[&str]) -> String {
        format!("import {{ {} }} from \"{}\";", symbols.join(", "), self.module)
    }
}

impl Default for ImportSpec {
    fn default() -> Self {
        Self::new(LOADING_MODULE)
    }
}

/// Matches an import statement starting a line, single- or multi-line, up to
/// the closing quote of its module specifier and an optional `;`.
///
/// Line comments inside the braces are skipped whole.
fn import_statement_re() -> &'static Regex {
    static IMPORT_RE: OnceLock<Regex> = OnceLock::new();
    IMPORT_RE.get_or_init(|| {
        Regex::new(
            r#"(?m)^[ \t]*import[\s{*](?:[^;'"`()<>=/]|/[^/'"]|//[^\n]*\n|'[^'\n]*'|"[^"\n]*")*?["'][^"'\n]+["'][ \t]*;?"#,
        )
        .expect("Invalid regex constant")
    })
}

/// Matches leading blank lines, comments and directives (`"use client";`).
fn prologue_re() -> &'static Regex {
    static PROLOGUE_RE: OnceLock<Regex> = OnceLock::new();
    PROLOGUE_RE.get_or_init(|| {
        Regex::new(
            r#"(?s)\A(?:[ \t]*(?://[^\n]*|/\*.*?\*/)?[ \t]*\r?\n|[ \t]*(?:"use [^"\n]*"|'use [^'\n]*')[ \t]*;?[ \t]*(?:\r?\n|\z))*"#,
        )
        .expect("Invalid regex constant")
    })
}

/// Whether an import statement in `source` already names `module`, whatever
/// symbols it imports. Re-exports and commented-out imports do not count.
pub fn imports_module(source: &str, module: &str) -> AppResult<bool> {
    let pattern = format!(
        r#"(?m)^[ \t]*import(?:\s[^;'"]*?\bfrom\s*|\s*)["']{}["']"#,
        regex::escape(module)
    );
    let re = Regex::new(&pattern)
        .map_err(|e| AppError::General(format!("Invalid import module '{}': {}", module, e)))?;
    Ok(re.is_match(source))
}

/// Adds the import for `symbols` unless the module is already imported.
///
/// The declaration goes right after the last import statement. A file with no
/// imports gets it at the top, below any leading comments and directives.
///
/// Returns `None` when the module was already imported.
pub fn add_import(source: &str, spec: &ImportSpec, symbols: &[&str]) -> AppResult<Option<String>> {
    if imports_module(source, &spec.module)? {
        debug!(module = %spec.module, "import already present");
        return Ok(None);
    }

    let eol = if source.contains("\r\n") { "\r\n" } else { "\n" };

    let insert_pos = match import_statement_re().find_iter(source).last() {
        // Anything after the statement on its line (a comment, a second import) stays above.
        Some(m) => source[m.end()..]
            .find('\n')
            .map_or(source.len(), |i| m.end() + i + 1),
        None => {
            debug!(module = %spec.module, "no existing imports, inserting at top");
            prologue_re().find(source).map_or(0, |m| m.end())
        }
    };

    let declaration = spec.declaration(symbols);
    let mut new_source = String::with_capacity(source.len() + declaration.len() + 2 * eol.len());
    new_source.push_str(&source[..insert_pos]);
    if insert_pos > 0 && !source[..insert_pos].ends_with('\n') {
        new_source.push_str(eol);
    }
    new_source.push_str(&declaration);
    new_source.push_str(eol);
    new_source.push_str(&source[insert_pos..]);

    Ok(Some(new_source))
}
