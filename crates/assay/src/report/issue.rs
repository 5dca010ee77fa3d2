//! Validation issue types.
//!
//! Issues are immutable once created. They are appended to one of two
//! ordered lists on the context (errors, warnings) and never removed.

use serde::{Deserialize, Serialize};

/// Which part of the input an issue concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Header,
    Row,
    Data,
    Structure,
    File,
}

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only, may not require action.
    Info,
    /// Potential issue that should be reviewed.
    Warning,
    /// Definite issue that should be addressed.
    Error,
}

impl Severity {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

/// Stable machine-readable issue codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    EmptyFile,
    FileTooLarge,
    TooManyRows,
    NoDelimiterDetected,
    UnclosedQuote,
    StrayQuote,
    EmptyHeader,
    DuplicateHeader,
    SuspiciousHeader,
    MissingRequiredColumn,
    EmptyRow,
    InconsistentColumns,
    TypeInconsistency,
    TypeMismatch,
    OutlierDetected,
    Cancelled,
    ProcessingError,
}

impl IssueCode {
    /// Stable string form, matching the serialized representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::EmptyFile => "EMPTY_FILE",
            IssueCode::FileTooLarge => "FILE_TOO_LARGE",
            IssueCode::TooManyRows => "TOO_MANY_ROWS",
            IssueCode::NoDelimiterDetected => "NO_DELIMITER_DETECTED",
            IssueCode::UnclosedQuote => "UNCLOSED_QUOTE",
            IssueCode::StrayQuote => "STRAY_QUOTE",
            IssueCode::EmptyHeader => "EMPTY_HEADER",
            IssueCode::DuplicateHeader => "DUPLICATE_HEADER",
            IssueCode::SuspiciousHeader => "SUSPICIOUS_HEADER",
            IssueCode::MissingRequiredColumn => "MISSING_REQUIRED_COLUMN",
            IssueCode::EmptyRow => "EMPTY_ROW",
            IssueCode::InconsistentColumns => "INCONSISTENT_COLUMNS",
            IssueCode::TypeInconsistency => "TYPE_INCONSISTENCY",
            IssueCode::TypeMismatch => "TYPE_MISMATCH",
            IssueCode::OutlierDetected => "OUTLIER_DETECTED",
            IssueCode::Cancelled => "CANCELLED",
            IssueCode::ProcessingError => "PROCESSING_ERROR",
        }
    }
}

/// Location of an issue within the input.
///
/// Rows are zero-based data-row indices (the header row is not counted);
/// columns are zero-based positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

/// A single data-quality finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// Which part of the input this concerns.
    pub kind: IssueKind,
    /// Severity level.
    pub severity: Severity,
    /// Stable machine-readable code.
    pub code: IssueCode,
    /// Human-readable description.
    pub message: String,
    /// Affected row/column, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Remediation hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Create a new issue.
    pub fn new(
        kind: IssueKind,
        severity: Severity,
        code: IssueCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            code,
            message: message.into(),
            location: None,
            suggestion: None,
        }
    }

    /// Attach a row location.
    pub fn at_row(mut self, row: usize) -> Self {
        self.location = Some(Location { row, column: None });
        self
    }

    /// Attach a row and column location.
    pub fn at_cell(mut self, row: usize, column: usize) -> Self {
        self.location = Some(Location {
            row,
            column: Some(column),
        });
        self
    }

    /// Attach a remediation suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}
