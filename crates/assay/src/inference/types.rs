//! Type catalog and per-value predicates.
//!
//! Every predicate is pure over a trimmed string, and the catalog is a
//! fixed priority list so tie-breaking is reproducible across runs.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::report::ValueType;

static INTEGER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+$").unwrap());

static FLOAT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d*(\.\d+)?$").unwrap());

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d(:[0-5]\d)?$").unwrap());

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://\S+$").unwrap());

static CURRENCY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[$€£¥]?\s?-?\d{1,3}(,\d{3})*(\.\d{2})?$").unwrap());

static PERCENTAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+(\.\d+)?%$").unwrap());

static IP_ADDRESS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^((25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)\.){3}(25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)$")
        .unwrap()
});

static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}[-/]\d{1,2}[-/]\d{1,2}$").unwrap(), // ISO-ish, year first
        Regex::new(r"^\d{1,2}[-/]\d{1,2}[-/]\d{4}$").unwrap(), // day/month first
    ]
});

/// Catalog order. Evaluated first to last; the first of two equal match
/// fractions wins.
pub const TYPE_PRIORITY: &[ValueType] = &[
    ValueType::Integer,
    ValueType::Float,
    ValueType::Boolean,
    ValueType::Date,
    ValueType::Time,
    ValueType::Email,
    ValueType::Url,
    ValueType::Currency,
    ValueType::Percentage,
    ValueType::IpAddress,
    ValueType::Phone,
];

/// Result of inferring a column's type from sampled values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeInference {
    pub value_type: ValueType,
    /// Fraction of sampled values matching the type (or `1 - best` for
    /// string fallback, 1.0 for empty columns).
    pub confidence: f64,
}

/// Check a single trimmed value against a catalog type's predicate.
pub fn matches_type(value: &str, value_type: ValueType) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return matches!(value_type, ValueType::Empty);
    }

    match value_type {
        ValueType::Integer => INTEGER_RE.is_match(trimmed),
        ValueType::Float => {
            FLOAT_RE.is_match(trimmed)
                && trimmed.chars().any(|c| c.is_ascii_digit())
                && !INTEGER_RE.is_match(trimmed)
        }
        ValueType::Boolean => matches!(
            trimmed.to_lowercase().as_str(),
            "true" | "false" | "t" | "f" | "1" | "0" | "yes" | "no"
        ),
        ValueType::Date => DATE_PATTERNS.iter().any(|p| p.is_match(trimmed)),
        ValueType::Time => TIME_RE.is_match(trimmed),
        ValueType::Email => EMAIL_RE.is_match(trimmed),
        ValueType::Url => URL_RE.is_match(trimmed),
        ValueType::Currency => CURRENCY_RE.is_match(trimmed),
        ValueType::Percentage => PERCENTAGE_RE.is_match(trimmed),
        ValueType::IpAddress => IP_ADDRESS_RE.is_match(trimmed),
        ValueType::Phone => is_phone(trimmed),
        ValueType::String => true,
        ValueType::Empty => false,
    }
}

/// Check whether a value is representable in the column's inferred type.
///
/// Looser than the catalog predicate where a type subsumes another:
/// integer-shaped values are valid floats, currency, and percentages
/// without their decoration.
pub fn is_compatible(value: &str, value_type: ValueType) -> bool {
    match value_type {
        ValueType::Float => {
            matches_type(value, ValueType::Float) || matches_type(value, ValueType::Integer)
        }
        ValueType::Currency => {
            matches_type(value, ValueType::Currency)
                || matches_type(value, ValueType::Integer)
                || matches_type(value, ValueType::Float)
        }
        ValueType::Percentage => {
            matches_type(value, ValueType::Percentage)
                || matches_type(value, ValueType::Integer)
                || matches_type(value, ValueType::Float)
        }
        other => matches_type(value, other),
    }
}

/// 7-15 digits once common separators are stripped.
fn is_phone(value: &str) -> bool {
    let digits: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.' | '+'))
        .collect();
    !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit())
        && (7..=15).contains(&digits.len())
}

/// Infer the dominant type of a column from non-null sampled values.
///
/// Confidence is the best match fraction; below 0.5 the column falls back
/// to `string` with confidence `1 - best`. An empty sample classifies as
/// `empty` with confidence 1.
pub fn infer_type(values: &[&str]) -> TypeInference {
    if values.is_empty() {
        return TypeInference {
            value_type: ValueType::Empty,
            confidence: 1.0,
        };
    }

    let total = values.len() as f64;
    let mut best_type = ValueType::String;
    let mut best_fraction = 0.0f64;

    for &candidate in TYPE_PRIORITY {
        let matched = values.iter().filter(|v| matches_type(v, candidate)).count();
        let fraction = matched as f64 / total;
        if fraction > best_fraction {
            best_fraction = fraction;
            best_type = candidate;
        }
    }

    if best_fraction >= 0.5 {
        TypeInference {
            value_type: best_type,
            confidence: best_fraction,
        }
    } else {
        TypeInference {
            value_type: ValueType::String,
            confidence: 1.0 - best_fraction,
        }
    }
}
