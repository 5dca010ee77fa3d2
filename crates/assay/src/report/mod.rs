//! Report data model: issues, analyses, the validation context, and the
//! assembled result.

mod analysis;
mod context;
mod issue;
mod result;

pub use analysis::{
    Analytics, ColumnAnalysis, DataProfile, FileStats, HeaderAnalysis, InconsistentRow,
    LineEndingKind, OutlierRecord, QuoteIssueKind, QuotingIssue, RowAnalysis, TypeInconsistency,
    ValueType,
};
pub use context::ValidationContext;
pub use issue::{IssueCode, IssueKind, Location, Severity, ValidationIssue};
pub use result::{
    ErrorPayload, OutputData, ValidationMetadata, ValidationResult, ValidationSummary,
};
