//! Per-column analysis: sampling, type inference, and consistency checks.

use indexmap::IndexMap;

use crate::input::Table;
use crate::options::NullValues;
use crate::report::{
    ColumnAnalysis, IssueCode, IssueKind, Severity, TypeInconsistency, ValidationIssue, ValueType,
};

use super::sample::{Reservoir, DEFAULT_SAMPLE_CAPACITY};
use super::types::{infer_type, is_compatible};

/// Analyzes every column of a table.
pub struct ColumnAnalyzer<'a> {
    nulls: &'a NullValues,
    sample_capacity: usize,
    seed: u64,
    strict_mode: bool,
}

impl<'a> ColumnAnalyzer<'a> {
    /// Create an analyzer for one run's options.
    pub fn new(nulls: &'a NullValues, seed: u64, strict_mode: bool) -> Self {
        Self {
            nulls,
            sample_capacity: DEFAULT_SAMPLE_CAPACITY,
            seed,
            strict_mode,
        }
    }

    /// Analyze all columns, returning analyses keyed by header name plus
    /// any type-consistency issues.
    pub fn analyze(&self, table: &Table) -> (IndexMap<String, ColumnAnalysis>, Vec<ValidationIssue>) {
        let mut analyses = IndexMap::new();
        let mut issues = Vec::new();

        for (col_idx, header) in table.headers.iter().enumerate() {
            let (analysis, mut column_issues) = self.analyze_column(table, col_idx);
            issues.append(&mut column_issues);
            analyses.insert(header.clone(), analysis);
        }

        (analyses, issues)
    }

    /// Analyze a single column by index.
    pub fn analyze_column(
        &self,
        table: &Table,
        col_idx: usize,
    ) -> (ColumnAnalysis, Vec<ValidationIssue>) {
        let values: Vec<&str> = table.column_values(col_idx).collect();
        let non_null: Vec<&str> = values
            .iter()
            .copied()
            .filter(|v| !self.nulls.is_null(v))
            .collect();
        let null_count = values.len() - non_null.len();

        // Reservoir-sample the non-null values; each column gets its own
        // deterministic stream so adding a column never reshuffles others.
        let mut reservoir = Reservoir::new(
            self.sample_capacity,
            self.seed.wrapping_add(col_idx as u64),
        );
        reservoir.extend(non_null.iter().copied());
        let inference = infer_type(reservoir.items());

        let mut analysis = ColumnAnalysis::new(inference.value_type, inference.confidence);
        analysis.null_count = null_count;

        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for &v in &non_null {
            *counts.entry(v).or_insert(0) += 1;
        }
        analysis.unique_value_count = counts.len();
        analysis.most_common_value = most_common(&counts).map(|v| v.to_string());

        let mut issues = Vec::new();
        if !matches!(inference.value_type, ValueType::String | ValueType::Empty) {
            for (row_idx, value) in values.iter().enumerate() {
                if self.nulls.is_null(value) {
                    continue;
                }
                if !is_compatible(value, inference.value_type) {
                    analysis.type_inconsistencies.push(TypeInconsistency {
                        row: row_idx,
                        value: value.to_string(),
                        expected_type: inference.value_type,
                    });
                    let (severity, code) = if self.strict_mode {
                        (Severity::Error, IssueCode::TypeMismatch)
                    } else {
                        (Severity::Warning, IssueCode::TypeInconsistency)
                    };
                    issues.push(
                        ValidationIssue::new(
                            IssueKind::Data,
                            severity,
                            code,
                            format!(
                                "Row {}: value '{}' does not match inferred type {}",
                                row_idx + 1,
                                value,
                                inference.value_type.as_str()
                            ),
                        )
                        .at_cell(row_idx, col_idx)
                        .with_suggestion("Correct the value or review the column's type"),
                    );
                }
            }
        }

        (analysis, issues)
    }
}

/// First-seen value with the highest count.
fn most_common<'v>(counts: &IndexMap<&'v str, usize>) -> Option<&'v str> {
    let mut best: Option<(&str, usize)> = None;
    for (&value, &count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((value, count)),
        }
    }
    best.map(|(value, _)| value)
}
