//! Validation options with documented defaults.
//!
//! The engine never infers option meaning positionally: every knob is a
//! named field, and a caller-supplied value always wins over the default.

use serde::{Deserialize, Serialize};

/// Default reservoir seed. A fixed constant keeps repeated runs over
/// identical input idempotent; callers needing fresh randomness override
/// [`ValidationOptions::sample_seed`].
pub const DEFAULT_SAMPLE_SEED: u64 = 0x5EED_CAFE;

/// Cell values treated as null when no override is supplied.
const DEFAULT_NULL_VALUES: &[&str] = &["", "na", "n/a", "null", "none", "nil", ".", "-"];

/// How much metadata the result carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataLevel {
    /// No metadata at all.
    None,
    /// Counts and the quality score only.
    Summary,
    /// Full validation context including per-issue lists.
    Detailed,
}

impl Default for MetadataLevel {
    fn default() -> Self {
        MetadataLevel::Summary
    }
}

/// Options for the streaming session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamingOptions {
    /// Characters processed between progress callbacks.
    pub chunk_size: usize,
}

impl Default for StreamingOptions {
    fn default() -> Self {
        Self { chunk_size: 64 * 1024 }
    }
}

/// The set of cell values recognized as null/missing.
#[derive(Debug, Clone)]
pub struct NullValues {
    values: Vec<String>,
}

impl NullValues {
    /// Build a matcher from explicit values. Matching is case-insensitive
    /// on the trimmed cell.
    pub fn new(values: &[String]) -> Self {
        Self {
            values: values.iter().map(|v| v.trim().to_lowercase()).collect(),
        }
    }

    /// Check whether a cell value represents null.
    pub fn is_null(&self, value: &str) -> bool {
        let trimmed = value.trim().to_lowercase();
        self.values.iter().any(|v| *v == trimmed)
    }
}

/// Configuration for one validation run.
///
/// Defaults follow the documented contract: auto-detected delimiter,
/// double-quote quoting, a header row, lenient typing, whitespace trimming,
/// summary metadata, and all profiling features off.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationOptions {
    /// Field delimiter (None = auto-detect).
    pub delimiter: Option<char>,
    /// Quote character.
    pub quote_char: char,
    /// Whether the first row is a header row.
    pub has_header: bool,
    /// Escalate type inconsistencies from warnings to errors.
    pub strict_mode: bool,
    /// Trim surrounding whitespace from every cell after tokenization.
    pub trim_whitespace: bool,
    /// Cell values treated as null (case-insensitive).
    pub null_values: Vec<String>,
    /// Hard cap on data rows (None = unlimited). Exceeding it is a hard stop.
    pub max_rows: Option<usize>,
    /// Hard cap on input bytes (None = unlimited). Exceeding it is a hard stop.
    pub max_file_size: Option<usize>,
    /// Columns that must be present in the header set (case-insensitive).
    pub required_columns: Vec<String>,
    /// Return rows as header-keyed objects instead of arrays.
    pub return_objects: bool,
    /// Restrict returned data to these field names (None = all fields).
    pub output_fields: Option<Vec<String>>,
    /// How much metadata the result carries.
    pub metadata_level: MetadataLevel,
    /// Run the format-pattern catalog over the dataset.
    pub enable_profiling: bool,
    /// Compute pairwise Pearson correlations between numeric columns.
    pub calculate_correlations: bool,
    /// Detect IQR/length outliers.
    pub outlier_detection: bool,
    /// Skip materializing output; report intended changes only.
    pub dry_run: bool,
    /// Streaming/progress configuration.
    pub streaming: Option<StreamingOptions>,
    /// Seed for the inference reservoir sampler.
    pub sample_seed: u64,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            quote_char: '"',
            has_header: true,
            strict_mode: false,
            trim_whitespace: true,
            null_values: DEFAULT_NULL_VALUES.iter().map(|s| s.to_string()).collect(),
            max_rows: None,
            max_file_size: None,
            required_columns: Vec::new(),
            return_objects: false,
            output_fields: None,
            metadata_level: MetadataLevel::default(),
            enable_profiling: false,
            calculate_correlations: false,
            outlier_detection: false,
            dry_run: false,
            streaming: None,
            sample_seed: DEFAULT_SAMPLE_SEED,
        }
    }
}

impl ValidationOptions {
    /// Build the null-value matcher for this configuration.
    pub fn null_matcher(&self) -> NullValues {
        NullValues::new(&self.null_values)
    }

    /// Reject contradictory combinations before the pipeline starts.
    pub fn check(&self) -> crate::error::Result<()> {
        if let Some(d) = self.delimiter {
            if d == self.quote_char {
                return Err(crate::error::AssayError::Config(format!(
                    "delimiter and quote character are both '{}'",
                    d
                )));
            }
        }
        if let Some(ref streaming) = self.streaming {
            if streaming.chunk_size == 0 {
                return Err(crate::error::AssayError::Config(
                    "streaming chunk size must be at least 1".to_string(),
                ));
            }
        }
        if let Some(ref fields) = self.output_fields {
            if fields.is_empty() {
                return Err(crate::error::AssayError::Config(
                    "output fields list is empty; omit it to return all fields".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ValidationOptions::default();
        assert!(opts.delimiter.is_none());
        assert_eq!(opts.quote_char, '"');
        assert!(opts.has_header);
        assert!(!opts.strict_mode);
        assert_eq!(opts.metadata_level, MetadataLevel::Summary);
        assert_eq!(opts.sample_seed, DEFAULT_SAMPLE_SEED);
    }

    #[test]
    fn test_null_matcher_case_insensitive() {
        let opts = ValidationOptions::default();
        let nulls = opts.null_matcher();
        assert!(nulls.is_null(""));
        assert!(nulls.is_null("  NA "));
        assert!(nulls.is_null("Null"));
        assert!(!nulls.is_null("0"));
        assert!(!nulls.is_null("value"));
    }

    #[test]
    fn test_custom_null_values_replace_defaults() {
        let opts = ValidationOptions {
            null_values: vec!["missing".to_string()],
            ..Default::default()
        };
        let nulls = opts.null_matcher();
        assert!(nulls.is_null("MISSING"));
        assert!(!nulls.is_null("na"));
    }

    #[test]
    fn test_check_rejects_delimiter_quote_clash() {
        let opts = ValidationOptions {
            delimiter: Some('"'),
            ..Default::default()
        };
        assert!(opts.check().is_err());
    }

    #[test]
    fn test_check_rejects_zero_chunk_size() {
        let opts = ValidationOptions {
            streaming: Some(StreamingOptions { chunk_size: 0 }),
            ..Default::default()
        };
        assert!(opts.check().is_err());
    }
}
