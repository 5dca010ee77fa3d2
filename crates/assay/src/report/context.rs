//! The validation context threaded through one pipeline invocation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::analysis::{Analytics, ColumnAnalysis, DataProfile, FileStats, HeaderAnalysis, RowAnalysis};
use super::issue::{Severity, ValidationIssue};

/// Aggregated findings for one validation run.
///
/// A fresh context is created per call, populated strictly in pipeline
/// order, and discarded once the result is assembled. It is never shared
/// across concurrent invocations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationContext {
    pub file_stats: FileStats,
    pub header_analysis: HeaderAnalysis,
    pub row_analysis: RowAnalysis,
    /// Per-column analyses in header order.
    pub column_analysis: IndexMap<String, ColumnAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<DataProfile>,
    pub analytics: Analytics,
    /// Error-severity issues in detection order.
    pub errors: Vec<ValidationIssue>,
    /// Warning- and info-severity issues in detection order.
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an issue to the list matching its severity.
    pub fn push_issue(&mut self, issue: ValidationIssue) {
        match issue.severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning | Severity::Info => self.warnings.push(issue),
        }
    }

    /// Number of error-severity issues.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Number of warning-severity issues (info entries are excluded).
    pub fn warning_count(&self) -> usize {
        self.warnings
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// First error in detection order, if any.
    pub fn first_error(&self) -> Option<&ValidationIssue> {
        self.errors.first()
    }

    /// Mean type confidence across analyzed columns (0.5 when there are
    /// no columns, which zeroes the score term).
    pub fn avg_type_confidence(&self) -> f64 {
        if self.column_analysis.is_empty() {
            return 0.5;
        }
        let sum: f64 = self
            .column_analysis
            .values()
            .map(|c| c.type_confidence)
            .sum();
        sum / self.column_analysis.len() as f64
    }

    /// Mean null fraction across analyzed columns.
    pub fn avg_null_rate(&self) -> f64 {
        if self.column_analysis.is_empty() {
            return 0.0;
        }
        let rows = self.file_stats.total_rows;
        let sum: f64 = self
            .column_analysis
            .values()
            .map(|c| c.null_rate(rows))
            .sum();
        sum / self.column_analysis.len() as f64
    }
}
