//! Structural validation: header well-formedness and row shape.

use crate::inference::{matches_type, ValueType};
use crate::input::Table;
use crate::report::{
    HeaderAnalysis, InconsistentRow, IssueCode, IssueKind, QuoteIssueKind, QuotingIssue,
    RowAnalysis, Severity, ValidationIssue,
};

/// Validates the structural layer of a tokenized table.
pub struct StructureValidator;

impl StructureValidator {
    /// Validate the header row.
    ///
    /// Only called when the input declares headers. Duplicate detection is
    /// case-insensitive; a header that looks like data (date, time, email,
    /// or pure integer) is flagged as suspicious, not as an error.
    pub fn validate_headers(
        headers: &[String],
        required_columns: &[String],
    ) -> (HeaderAnalysis, Vec<ValidationIssue>) {
        let mut analysis = HeaderAnalysis {
            has_headers: true,
            headers: headers.to_vec(),
            ..HeaderAnalysis::default()
        };
        let mut issues = Vec::new();

        let mut seen: Vec<(String, &str)> = Vec::new();
        for (idx, header) in headers.iter().enumerate() {
            let trimmed = header.trim();
            let lower = trimmed.to_lowercase();

            if trimmed.is_empty() {
                analysis.empty_header_indices.push(idx);
                issues.push(
                    ValidationIssue::new(
                        IssueKind::Header,
                        Severity::Error,
                        IssueCode::EmptyHeader,
                        format!("Header at column {} is empty", idx + 1),
                    )
                    .at_cell(0, idx)
                    .with_suggestion("Give every column a non-empty name"),
                );
                continue;
            }

            let first_spelling = seen
                .iter()
                .find(|(l, _)| *l == lower)
                .map(|(_, s)| s.to_string());
            if let Some(original) = first_spelling {
                if !analysis
                    .duplicate_headers
                    .iter()
                    .any(|d| d.to_lowercase() == lower)
                {
                    issues.push(
                        ValidationIssue::new(
                            IssueKind::Header,
                            Severity::Error,
                            IssueCode::DuplicateHeader,
                            format!("Duplicate header '{}'", original),
                        )
                        .at_cell(0, idx)
                        .with_suggestion("Rename duplicated columns to unique names"),
                    );
                    analysis.duplicate_headers.push(original);
                }
            } else {
                seen.push((lower, trimmed));
            }

            if Self::looks_like_data(trimmed) {
                analysis.suspicious_headers.push(trimmed.to_string());
                issues.push(
                    ValidationIssue::new(
                        IssueKind::Header,
                        Severity::Warning,
                        IssueCode::SuspiciousHeader,
                        format!("Header '{}' looks like data, not a label", trimmed),
                    )
                    .at_cell(0, idx)
                    .with_suggestion("Check whether the input actually has a header row"),
                );
            }
        }

        for required in required_columns {
            let required_lower = required.trim().to_lowercase();
            let present = headers
                .iter()
                .any(|h| h.trim().to_lowercase() == required_lower);
            if !present {
                analysis
                    .missing_required_columns
                    .push(required.trim().to_string());
                issues.push(
                    ValidationIssue::new(
                        IssueKind::Header,
                        Severity::Error,
                        IssueCode::MissingRequiredColumn,
                        format!("Required column '{}' is missing", required.trim()),
                    )
                    .with_suggestion("Add the column or adjust requiredColumns"),
                );
            }
        }

        (analysis, issues)
    }

    /// Validate row shape and surface tokenizer quoting issues.
    ///
    /// `quoting_issues` carry raw row indices (header row included); they
    /// are remapped to data-row indices here.
    pub fn validate_rows(
        table: &Table,
        has_header: bool,
        quoting_issues: &[QuotingIssue],
    ) -> (RowAnalysis, Vec<ValidationIssue>) {
        let mut analysis = RowAnalysis::default();
        let mut issues = Vec::new();
        let expected_cols = table.column_count();

        for (row_idx, row) in table.rows.iter().enumerate() {
            if row.iter().all(|cell| cell.trim().is_empty()) {
                analysis.empty_row_indices.push(row_idx);
                issues.push(
                    ValidationIssue::new(
                        IssueKind::Row,
                        Severity::Warning,
                        IssueCode::EmptyRow,
                        format!("Row {} is empty", row_idx + 1),
                    )
                    .at_row(row_idx)
                    .with_suggestion("Remove empty rows from the input"),
                );
                continue;
            }

            if has_header && row.len() != expected_cols {
                let diff = row.len().abs_diff(expected_cols);
                let severity = if diff > 1 {
                    Severity::Error
                } else {
                    Severity::Warning
                };
                analysis.inconsistent_rows.push(InconsistentRow {
                    row: row_idx,
                    expected_cols,
                    actual_cols: row.len(),
                });
                issues.push(
                    ValidationIssue::new(
                        IssueKind::Row,
                        severity,
                        IssueCode::InconsistentColumns,
                        format!(
                            "Row {} has {} columns, expected {}",
                            row_idx + 1,
                            row.len(),
                            expected_cols
                        ),
                    )
                    .at_row(row_idx)
                    .with_suggestion("Check for missing delimiters or stray quotes"),
                );
            }
        }

        for quoting in quoting_issues {
            let row_idx = if has_header {
                quoting.row.saturating_sub(1)
            } else {
                quoting.row
            };
            analysis.quoting_issues.push(QuotingIssue {
                row: row_idx,
                kind: quoting.kind,
                issue: quoting.issue.clone(),
            });

            let (severity, code) = match quoting.kind {
                QuoteIssueKind::UnclosedQuote => (Severity::Error, IssueCode::UnclosedQuote),
                QuoteIssueKind::StrayQuote => (Severity::Warning, IssueCode::StrayQuote),
            };
            issues.push(
                ValidationIssue::new(
                    IssueKind::Structure,
                    severity,
                    code,
                    format!("Row {}: {}", row_idx + 1, quoting.issue),
                )
                .at_row(row_idx)
                .with_suggestion("Balance quote characters or escape them by doubling"),
            );
        }

        (analysis, issues)
    }

    /// A header is suspicious when it matches a data-shaped pattern.
    fn looks_like_data(header: &str) -> bool {
        matches_type(header, ValueType::Integer)
            || matches_type(header, ValueType::Date)
            || matches_type(header, ValueType::Time)
            || matches_type(header, ValueType::Email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_duplicate_headers_case_insensitive() {
        let (analysis, issues) = StructureValidator::validate_headers(
            &headers(&["a", "A", "b", "a"]),
            &[],
        );
        assert_eq!(analysis.duplicate_headers, vec!["a"]);
        let dup_errors: Vec<_> = issues
            .iter()
            .filter(|i| i.code == IssueCode::DuplicateHeader)
            .collect();
        assert_eq!(dup_errors.len(), 1);
        assert_eq!(dup_errors[0].severity, Severity::Error);
    }

    #[test]
    fn test_empty_header_flagged() {
        let (analysis, issues) =
            StructureValidator::validate_headers(&headers(&["a", "", "c"]), &[]);
        assert_eq!(analysis.empty_header_indices, vec![1]);
        assert!(issues.iter().any(|i| i.code == IssueCode::EmptyHeader));
    }

    #[test]
    fn test_suspicious_headers_are_warnings() {
        let (analysis, issues) = StructureValidator::validate_headers(
            &headers(&["2024-01-15", "42", "name@example.com", "label"]),
            &[],
        );
        assert_eq!(analysis.suspicious_headers.len(), 3);
        assert!(issues
            .iter()
            .filter(|i| i.code == IssueCode::SuspiciousHeader)
            .all(|i| i.severity == Severity::Warning));
    }

    #[test]
    fn test_missing_required_column() {
        let (analysis, issues) = StructureValidator::validate_headers(
            &headers(&["id", "name"]),
            &["Email".to_string(), "ID".to_string()],
        );
        assert_eq!(analysis.missing_required_columns, vec!["Email"]);
        assert_eq!(
            issues
                .iter()
                .filter(|i| i.code == IssueCode::MissingRequiredColumn)
                .count(),
            1
        );
    }

    #[test]
    fn test_empty_row_detected() {
        let table = Table::new(
            headers(&["a", "b"]),
            vec![
                vec!["1".to_string(), "2".to_string()],
                vec!["  ".to_string(), "".to_string()],
            ],
        );
        let (analysis, issues) = StructureValidator::validate_rows(&table, true, &[]);
        assert_eq!(analysis.empty_row_indices, vec![1]);
        assert!(issues.iter().any(|i| i.code == IssueCode::EmptyRow));
    }

    #[test]
    fn test_inconsistent_row_severity_escalates() {
        let table = Table::new(
            headers(&["a", "b", "c"]),
            vec![
                vec!["1".to_string(), "2".to_string()],
                vec!["1".to_string()],
            ],
        );
        let (analysis, issues) = StructureValidator::validate_rows(&table, true, &[]);
        assert_eq!(analysis.inconsistent_rows.len(), 2);

        let severities: Vec<Severity> = issues
            .iter()
            .filter(|i| i.code == IssueCode::InconsistentColumns)
            .map(|i| i.severity)
            .collect();
        // Off by one column is a warning; off by two is an error.
        assert_eq!(severities, vec![Severity::Warning, Severity::Error]);
    }

    #[test]
    fn test_quoting_issue_remapped_past_header() {
        let table = Table::new(headers(&["a"]), vec![vec!["x\"y".to_string()]]);
        let quoting = vec![QuotingIssue {
            row: 1,
            kind: QuoteIssueKind::StrayQuote,
            issue: "quote character '\"' inside an unquoted field".to_string(),
        }];
        let (analysis, issues) = StructureValidator::validate_rows(&table, true, &quoting);
        assert_eq!(analysis.quoting_issues[0].row, 0);
        assert!(issues.iter().any(|i| i.code == IssueCode::StrayQuote));
    }
}
