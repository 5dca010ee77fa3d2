//! Quality scoring and recommended actions.

use crate::report::ValidationContext;

/// Confidence below which a column's type is flagged for review.
const LOW_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Compute the 0-100 quality score.
///
/// `score = clamp(100 - 10*errors - 5*warnings
///                + 20*(avg_type_confidence - 0.5) - 20*avg_null_rate)`
/// rounded to the nearest integer.
pub fn quality_score(
    error_count: usize,
    warning_count: usize,
    avg_type_confidence: f64,
    avg_null_rate: f64,
) -> u8 {
    let raw = 100.0 - 10.0 * error_count as f64 - 5.0 * warning_count as f64
        + 20.0 * (avg_type_confidence - 0.5)
        - 20.0 * avg_null_rate;
    raw.clamp(0.0, 100.0).round() as u8
}

/// Generate recommended actions from the populated context.
///
/// Rules are evaluated in a fixed order; when none fires the data is
/// declared well-structured.
pub fn recommendations(ctx: &ValidationContext) -> Vec<String> {
    let mut actions = Vec::new();

    let error_count = ctx.error_count();
    if error_count > 0 {
        actions.push(format!(
            "Fix {} error(s) before using this data",
            error_count
        ));
    }

    let warning_count = ctx.warning_count();
    if warning_count > 0 {
        actions.push(format!("Review {} warning(s)", warning_count));
    }

    if !ctx.header_analysis.duplicate_headers.is_empty() {
        actions.push(format!(
            "Rename duplicate header(s): {}",
            ctx.header_analysis.duplicate_headers.join(", ")
        ));
    }

    if !ctx.row_analysis.empty_row_indices.is_empty() {
        actions.push(format!(
            "Consider removing {} empty row(s)",
            ctx.row_analysis.empty_row_indices.len()
        ));
    }

    let low_confidence: Vec<&str> = ctx
        .column_analysis
        .iter()
        .filter(|(_, a)| a.type_confidence < LOW_CONFIDENCE_THRESHOLD)
        .map(|(name, _)| name.as_str())
        .collect();
    if !low_confidence.is_empty() {
        actions.push(format!(
            "Review data types in column(s) with low confidence: {}",
            low_confidence.join(", ")
        ));
    }

    if let Some(ref profile) = ctx.profile {
        if !profile.outliers.is_empty() {
            actions.push(format!(
                "Investigate {} outlying value(s)",
                profile.outliers.len()
            ));
        }
    }

    if actions.is_empty() {
        actions.push("Data appears well-structured".to_string());
    }

    actions
}
