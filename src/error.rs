//! Error types for the recipe linter front end

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading and linting recipe files
#[derive(Error, Debug)]
pub enum LintError {
    /// Failed to read a file
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source is not valid Python
    #[error("failed to parse '{}' at line {line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Rules configuration is invalid
    #[error("invalid config '{}': {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// Directory traversal failed
    #[error("failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Failed to write a fixed file back
    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
