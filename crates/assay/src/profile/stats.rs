//! Numeric statistics and outlier detection.

use crate::report::{OutlierRecord, ValueType};

/// IQR multiplier defining the outlier fence.
const IQR_MULTIPLIER: f64 = 1.5;

/// Standard deviations from the mean length flagging a string outlier.
const LENGTH_SIGMA: f64 = 3.0;

/// Parse a cell into a number, stripping type decoration first.
///
/// Currency values lose their symbol and digit grouping; percentages lose
/// the percent sign. Other numeric types parse as-is.
pub fn parse_numeric(value: &str, value_type: ValueType) -> Option<f64> {
    let trimmed = value.trim();
    match value_type {
        ValueType::Currency => {
            let stripped: String = trimmed
                .chars()
                .filter(|c| !matches!(c, '$' | '€' | '£' | '¥' | ',' | ' '))
                .collect();
            stripped.parse().ok()
        }
        ValueType::Percentage => trimmed.strip_suffix('%').and_then(|s| s.trim().parse().ok()),
        _ => trimmed.parse().ok(),
    }
}

/// Summary statistics over a column's parseable values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl NumericSummary {
    /// Compute summary statistics; `None` when no values parse.
    pub fn compute(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let n = sorted.len() as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Some(Self {
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            mean,
            median: percentile(&sorted, 50.0),
            std_dev: variance.sqrt(),
        })
    }
}

/// Percentile by linear interpolation over a sorted slice.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let weight = rank - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}

/// Find values outside the IQR fence `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]`.
///
/// `values` pairs each cell's original text with its parsed number.
pub fn numeric_outliers(column: &str, values: &[(String, f64)]) -> Vec<OutlierRecord> {
    if values.len() < 4 {
        return Vec::new();
    }

    let mut sorted: Vec<f64> = values.iter().map(|(_, v)| *v).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let q1 = percentile(&sorted, 25.0);
    let q3 = percentile(&sorted, 75.0);
    let iqr = q3 - q1;
    let lower = q1 - IQR_MULTIPLIER * iqr;
    let upper = q3 + IQR_MULTIPLIER * iqr;

    values
        .iter()
        .filter(|(_, v)| *v < lower || *v > upper)
        .map(|(raw, v)| OutlierRecord {
            column: column.to_string(),
            value: raw.clone(),
            reason: format!(
                "value {} is outside the IQR fence [{:.2}, {:.2}]",
                v, lower, upper
            ),
        })
        .collect()
}

/// Flag string values whose length deviates more than three standard
/// deviations from the column's mean length.
pub fn string_length_outliers(column: &str, values: &[&str]) -> Vec<OutlierRecord> {
    if values.len() < 4 {
        return Vec::new();
    }

    let lengths: Vec<f64> = values.iter().map(|v| v.chars().count() as f64).collect();
    let n = lengths.len() as f64;
    let mean = lengths.iter().sum::<f64>() / n;
    let variance = lengths.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    if std_dev == 0.0 {
        return Vec::new();
    }

    values
        .iter()
        .zip(&lengths)
        .filter(|&(_, &len)| (len - mean).abs() > LENGTH_SIGMA * std_dev)
        .map(|(&raw, &len)| OutlierRecord {
            column: column.to_string(),
            value: raw.to_string(),
            reason: format!(
                "length {} deviates more than {} standard deviations from the mean length {:.1}",
                len as usize, LENGTH_SIGMA as usize, mean
            ),
        })
        .collect()
}
