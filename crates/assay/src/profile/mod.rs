//! Statistical profiling: numeric summaries, outliers, format patterns,
//! and cross-column correlation.

mod correlation;
mod patterns;
mod stats;

pub use correlation::{build_correlations, pearson};
pub use patterns::detect_patterns;
pub use stats::{numeric_outliers, parse_numeric, percentile, string_length_outliers, NumericSummary};

use indexmap::IndexMap;

use crate::input::Table;
use crate::options::NullValues;
use crate::report::{
    ColumnAnalysis, DataProfile, IssueCode, IssueKind, Severity, ValidationIssue, ValueType,
};

/// Profiling switches for one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Profiler {
    pub outlier_detection: bool,
    pub enable_profiling: bool,
    pub calculate_correlations: bool,
}

impl Profiler {
    /// Attach numeric statistics to column analyses and, when enabled,
    /// build the dataset profile.
    ///
    /// Statistics for numeric columns are always computed; the profile
    /// itself exists only when at least one profiling switch is on.
    pub fn profile(
        &self,
        table: &Table,
        analyses: &mut IndexMap<String, ColumnAnalysis>,
        nulls: &NullValues,
    ) -> (Option<DataProfile>, Vec<ValidationIssue>) {
        let mut outliers = Vec::new();
        let mut issues = Vec::new();

        for (col_idx, header) in table.headers.iter().enumerate() {
            let Some(analysis) = analyses.get_mut(header) else {
                continue;
            };

            if analysis.inferred_type.is_numeric() {
                let parsed: Vec<(String, f64)> = table
                    .column_values(col_idx)
                    .filter(|v| !nulls.is_null(v))
                    .filter_map(|v| {
                        parse_numeric(v, analysis.inferred_type).map(|n| (v.to_string(), n))
                    })
                    .collect();

                let values: Vec<f64> = parsed.iter().map(|(_, n)| *n).collect();
                if let Some(summary) = NumericSummary::compute(&values) {
                    analysis.min = Some(summary.min);
                    analysis.max = Some(summary.max);
                    analysis.mean = Some(summary.mean);
                    analysis.median = Some(summary.median);
                    analysis.std_dev = Some(summary.std_dev);
                }

                if self.outlier_detection {
                    let column_outliers = numeric_outliers(header, &parsed);
                    if !column_outliers.is_empty() {
                        issues.push(outlier_notice(header, column_outliers.len(), col_idx));
                    }
                    outliers.extend(column_outliers);
                }
            } else if analysis.inferred_type == ValueType::String && self.outlier_detection {
                let values: Vec<&str> = table
                    .column_values(col_idx)
                    .filter(|v| !nulls.is_null(v))
                    .collect();
                let column_outliers = string_length_outliers(header, &values);
                if !column_outliers.is_empty() {
                    issues.push(outlier_notice(header, column_outliers.len(), col_idx));
                }
                outliers.extend(column_outliers);
            }
        }

        let wants_profile =
            self.outlier_detection || self.enable_profiling || self.calculate_correlations;
        if !wants_profile {
            return (None, issues);
        }

        let mut profile = DataProfile {
            outliers,
            ..DataProfile::default()
        };

        if self.enable_profiling {
            profile.patterns = detect_patterns(table);
        }

        if self.calculate_correlations {
            profile.correlations = build_correlations(table, analyses);
        }

        (Some(profile), issues)
    }
}

/// Info-level notice that a column has outlying values.
fn outlier_notice(column: &str, count: usize, col_idx: usize) -> ValidationIssue {
    ValidationIssue::new(
        IssueKind::Data,
        Severity::Info,
        IssueCode::OutlierDetected,
        format!("Column '{}' has {} outlying value(s)", column, count),
    )
    .at_cell(0, col_idx)
    .with_suggestion("Investigate whether the outliers are data entry errors")
}
