//! Structural, per-column, and dataset-wide analysis records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Line-ending convention observed in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEndingKind {
    #[serde(rename = "CRLF")]
    Crlf,
    #[serde(rename = "LF")]
    Lf,
    #[serde(rename = "CR")]
    Cr,
    Mixed,
    Unknown,
}

/// File-level facts, computed once and read-only thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileStats {
    pub line_ending_kind: LineEndingKind,
    pub detected_delimiter: Option<char>,
    pub total_rows: usize,
    pub file_size_bytes: usize,
}

impl Default for FileStats {
    fn default() -> Self {
        Self {
            line_ending_kind: LineEndingKind::Unknown,
            detected_delimiter: None,
            total_rows: 0,
            file_size_bytes: 0,
        }
    }
}

/// Header-level findings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderAnalysis {
    pub has_headers: bool,
    pub headers: Vec<String>,
    pub duplicate_headers: Vec<String>,
    pub empty_header_indices: Vec<usize>,
    pub suspicious_headers: Vec<String>,
    pub missing_required_columns: Vec<String>,
}

/// A row whose cell count disagrees with the header count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InconsistentRow {
    pub row: usize,
    pub expected_cols: usize,
    pub actual_cols: usize,
}

/// Kind of quoting problem found during tokenization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteIssueKind {
    /// The scan ended while still inside a quoted field.
    UnclosedQuote,
    /// A quote character appeared mid-field outside the quoted state.
    StrayQuote,
}

/// A quoting problem tied to a row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotingIssue {
    pub row: usize,
    pub kind: QuoteIssueKind,
    pub issue: String,
}

/// Row-level findings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowAnalysis {
    pub empty_row_indices: Vec<usize>,
    pub inconsistent_rows: Vec<InconsistentRow>,
    pub quoting_issues: Vec<QuotingIssue>,
}

/// Semantic type inferred for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueType {
    Integer,
    Float,
    Boolean,
    Date,
    Time,
    Email,
    Url,
    Currency,
    Percentage,
    IpAddress,
    Phone,
    String,
    Empty,
}

impl ValueType {
    /// Types whose values parse to numbers for statistics purposes.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ValueType::Integer | ValueType::Float | ValueType::Currency | ValueType::Percentage
        )
    }

    /// Stable string form, matching the serialized representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Boolean => "boolean",
            ValueType::Date => "date",
            ValueType::Time => "time",
            ValueType::Email => "email",
            ValueType::Url => "url",
            ValueType::Currency => "currency",
            ValueType::Percentage => "percentage",
            ValueType::IpAddress => "ipAddress",
            ValueType::Phone => "phone",
            ValueType::String => "string",
            ValueType::Empty => "empty",
        }
    }
}

/// A value that failed the column's inferred type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeInconsistency {
    pub row: usize,
    pub value: String,
    pub expected_type: ValueType,
}

/// Per-column inference and statistics, keyed by header name on the context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnAnalysis {
    pub inferred_type: ValueType,
    /// Fraction of sampled values matching the inferred type (0.0-1.0).
    pub type_confidence: f64,
    pub null_count: usize,
    pub unique_value_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_common_value: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub type_inconsistencies: Vec<TypeInconsistency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_dev: Option<f64>,
}

impl ColumnAnalysis {
    /// Create an analysis shell for a column before statistics are attached.
    pub fn new(inferred_type: ValueType, type_confidence: f64) -> Self {
        Self {
            inferred_type,
            type_confidence,
            null_count: 0,
            unique_value_count: 0,
            most_common_value: None,
            type_inconsistencies: Vec::new(),
            min: None,
            max: None,
            mean: None,
            median: None,
            std_dev: None,
        }
    }

    /// Null fraction over a given row count (0.0 when the table is empty).
    pub fn null_rate(&self, total_rows: usize) -> f64 {
        if total_rows == 0 {
            0.0
        } else {
            self.null_count as f64 / total_rows as f64
        }
    }
}

/// An outlying value with a human-readable reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlierRecord {
    pub column: String,
    pub value: String,
    pub reason: String,
}

/// Optional dataset-wide profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataProfile {
    /// Hit counts for the format-pattern catalog.
    pub patterns: IndexMap<String, usize>,
    /// Values outside their column's expected range.
    pub outliers: Vec<OutlierRecord>,
    /// Pairwise Pearson correlations, stored once per unordered pair
    /// (upper-triangular in column order).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlations: Option<IndexMap<String, IndexMap<String, f64>>>,
}

/// Run-level analytics and the aggregate quality verdict.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub processing_time_ms: u64,
    #[serde(rename = "memoryUsageMB")]
    pub memory_usage_mb: f64,
    pub recommended_actions: Vec<String>,
    /// Aggregate quality score in [0, 100].
    pub data_quality_score: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_numeric() {
        assert!(ValueType::Integer.is_numeric());
        assert!(ValueType::Currency.is_numeric());
        assert!(ValueType::Percentage.is_numeric());
        assert!(!ValueType::Email.is_numeric());
        assert!(!ValueType::String.is_numeric());
    }

    #[test]
    fn test_line_ending_serialization() {
        assert_eq!(
            serde_json::to_string(&LineEndingKind::Crlf).unwrap(),
            "\"CRLF\""
        );
        assert_eq!(
            serde_json::to_string(&LineEndingKind::Mixed).unwrap(),
            "\"mixed\""
        );
    }

    #[test]
    fn test_value_type_serialization_camel_case() {
        assert_eq!(
            serde_json::to_string(&ValueType::IpAddress).unwrap(),
            "\"ipAddress\""
        );
    }

    #[test]
    fn test_null_rate() {
        let mut analysis = ColumnAnalysis::new(ValueType::Integer, 1.0);
        analysis.null_count = 2;
        assert!((analysis.null_rate(8) - 0.25).abs() < f64::EPSILON);
        assert_eq!(analysis.null_rate(0), 0.0);
    }
}
