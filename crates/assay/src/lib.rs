//! Assay: CSV validation and quality analysis engine.
//!
//! Assay takes raw delimited text and produces a structured quality report:
//! it tokenizes the text respecting quoting rules, detects the delimiter
//! and line endings, validates headers and row shape, infers per-column
//! types with confidence scores, profiles numeric distributions, and rolls
//! everything into a 0-100 quality score with recommended actions.
//!
//! # Core Principles
//!
//! - **Pure function**: the report depends only on the input text and the
//!   options; nothing is cached across calls
//! - **Never throws for data problems**: findings accumulate as issues and
//!   the result is always well-formed
//! - **Reproducible**: sampling is seeded, so repeated runs agree
//!
//! # Example
//!
//! ```
//! use assay::{Engine, ValidationOptions};
//!
//! let engine = Engine::new(ValidationOptions::default());
//! let result = engine.validate("name,age\nAlice,30\nBob,25\n");
//!
//! assert!(result.success);
//! assert!(result.is_valid);
//! ```

pub mod cancel;
pub mod error;
pub mod inference;
pub mod input;
pub mod options;
pub mod profile;
pub mod report;
pub mod score;
pub mod structure;

mod engine;

pub use crate::cancel::CancelToken;
pub use crate::engine::{Engine, RunHooks, StreamingSession};
pub use crate::error::{AssayError, Result};
pub use crate::options::{MetadataLevel, NullValues, StreamingOptions, ValidationOptions};
pub use crate::report::{
    Analytics, ColumnAnalysis, DataProfile, ErrorPayload, FileStats, HeaderAnalysis, IssueCode,
    IssueKind, LineEndingKind, OutputData, RowAnalysis, Severity, ValidationContext,
    ValidationIssue, ValidationMetadata, ValidationResult, ValidationSummary, ValueType,
};

/// Validate CSV text in one call.
///
/// Equivalent to building an [`Engine`] with the options and calling
/// [`Engine::validate`].
pub fn validate_csv(text: &str, options: ValidationOptions) -> ValidationResult {
    Engine::new(options).validate(text)
}
