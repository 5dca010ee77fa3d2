//! Pairwise Pearson correlation between numeric columns.

use indexmap::IndexMap;

use crate::input::Table;
use crate::report::{ColumnAnalysis, ValueType};

use super::stats::parse_numeric;

/// Pearson correlation coefficient over paired samples.
///
/// `None` when fewer than two pairs exist or either side has zero
/// variance.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

/// Build the upper-triangular correlation matrix over numeric columns.
///
/// Each unordered pair is stored once, keyed by the earlier column in
/// header order. Pairs are formed from rows where both cells parse
/// numerically. `None` when fewer than two numeric columns exist.
pub fn build_correlations(
    table: &Table,
    analyses: &IndexMap<String, ColumnAnalysis>,
) -> Option<IndexMap<String, IndexMap<String, f64>>> {
    let numeric_columns: Vec<(usize, &String, ValueType)> = table
        .headers
        .iter()
        .enumerate()
        .filter_map(|(idx, name)| {
            analyses
                .get(name)
                .filter(|a| a.inferred_type.is_numeric())
                .map(|a| (idx, name, a.inferred_type))
        })
        .collect();

    if numeric_columns.len() < 2 {
        return None;
    }

    let mut matrix: IndexMap<String, IndexMap<String, f64>> = IndexMap::new();

    for (a_pos, &(a_idx, a_name, a_type)) in numeric_columns.iter().enumerate() {
        for &(b_idx, b_name, b_type) in numeric_columns.iter().skip(a_pos + 1) {
            let pairs: Vec<(f64, f64)> = table
                .rows
                .iter()
                .filter_map(|row| {
                    let x = row.get(a_idx).and_then(|v| parse_numeric(v, a_type))?;
                    let y = row.get(b_idx).and_then(|v| parse_numeric(v, b_type))?;
                    Some((x, y))
                })
                .collect();

            if let Some(r) = pearson(&pairs) {
                matrix
                    .entry(a_name.clone())
                    .or_default()
                    .insert(b_name.clone(), r);
            }
        }
    }

    Some(matrix)
}
