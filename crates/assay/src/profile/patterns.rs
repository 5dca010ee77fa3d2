//! Format-pattern detection across the dataset.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::input::Table;

/// The fixed pattern catalog, in reporting order.
static PATTERN_CATALOG: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    vec![
        (
            "email",
            Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap(),
        ),
        ("phone", Regex::new(r"^\+?\d[\d\s().-]{5,18}\d$").unwrap()),
        ("url", Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://\S+$").unwrap()),
        (
            "ipAddress",
            Regex::new(
                r"^((25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)\.){3}(25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)$",
            )
            .unwrap(),
        ),
        (
            "creditCard",
            Regex::new(r"^\d{4}[- ]?\d{4}[- ]?\d{4}[- ]?\d{4}$").unwrap(),
        ),
        ("ssn", Regex::new(r"^\d{3}-\d{2}-\d{4}$").unwrap()),
        ("postalCode", Regex::new(r"^\d{5}(-\d{4})?$").unwrap()),
        ("isoDate", Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap()),
        (
            "time24h",
            Regex::new(r"^([01]\d|2[0-3]):[0-5]\d(:[0-5]\d)?$").unwrap(),
        ),
        (
            "currency",
            Regex::new(r"^[$€£¥]\s?-?\d{1,3}(,\d{3})*(\.\d{2})?$").unwrap(),
        ),
    ]
});

/// Tally catalog hits over every non-empty cell in the dataset.
///
/// Only patterns with at least one hit appear in the result, in catalog
/// order.
pub fn detect_patterns(table: &Table) -> IndexMap<String, usize> {
    let mut tallies: IndexMap<String, usize> = IndexMap::new();

    for row in &table.rows {
        for cell in row {
            let trimmed = cell.trim();
            if trimmed.is_empty() {
                continue;
            }
            for (name, pattern) in PATTERN_CATALOG.iter() {
                if pattern.is_match(trimmed) {
                    *tallies.entry(name.to_string()).or_insert(0) += 1;
                }
            }
        }
    }

    tallies
}
