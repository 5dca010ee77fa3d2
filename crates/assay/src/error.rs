//! Error types for the Assay library.
//!
//! Data-quality findings are never surfaced through this type; they
//! accumulate as issues inside the validation context. `AssayError` is
//! reserved for genuine faults: invalid configuration, I/O, serialization,
//! and cooperative cancellation.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Assay operations.
#[derive(Debug, Error)]
pub enum AssayError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid or contradictory option combination.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The run was cancelled through a cancellation token.
    #[error("Validation cancelled")]
    Cancelled,

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Result type alias for Assay operations.
pub type Result<T> = std::result::Result<T, AssayError>;
