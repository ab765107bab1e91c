//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// A target file could not be read (missing, permission denied, not UTF-8).
    #[from(ignore)]
    #[display("Failed to read {path}: {source}")]
    Read {
        /// Path as displayed to the operator.
        path: String,
        /// Underlying IO failure.
        source: std::io::Error,
    },

    /// A rewritten file could not be written back.
    #[from(ignore)]
    #[display("Failed to write {path}: {source}")]
    Write {
        /// Path as displayed to the operator.
        path: String,
        /// Underlying IO failure.
        source: std::io::Error,
    },

    /// The target manifest is malformed.
    #[from(ignore)]
    #[display("Manifest Error: {_0}")]
    Manifest(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
