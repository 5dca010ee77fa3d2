//! The validation engine: pipeline orchestration and result assembly.
//!
//! Data flows strictly forward: text, detected delimiter, tokenized rows,
//! structural findings, per-column analyses, profile, score, final report.
//! Each invocation owns a private [`ValidationContext`]; nothing is cached
//! across calls, so identical input and options reproduce identical issue
//! lists, column analyses, and score. The audit id and timing fields are
//! the only expected variance.

use std::time::Instant;

use chrono::Utc;
use indexmap::IndexMap;
use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;

use crate::cancel::CancelToken;
use crate::error::{AssayError, Result};
use crate::inference::ColumnAnalyzer;
use crate::input::{detect_delimiter, detect_line_endings, Table, TokenizeHooks, Tokenizer};
use crate::options::{MetadataLevel, ValidationOptions};
use crate::profile::Profiler;
use crate::report::{
    ErrorPayload, IssueCode, IssueKind, OutputData, Severity, ValidationContext, ValidationIssue,
    ValidationMetadata, ValidationResult, ValidationSummary,
};
use crate::score::{quality_score, recommendations};
use crate::structure::StructureValidator;

/// Observability hooks for one run.
#[derive(Default)]
pub struct RunHooks<'a> {
    /// Invoked as `(processed_chars, total_chars)` during tokenization.
    pub progress: Option<&'a dyn Fn(usize, usize)>,
    /// Cancellation flag polled inside the tokenizer's scan loop.
    pub cancel: Option<&'a CancelToken>,
}

/// The CSV validation engine.
///
/// An engine is cheap to construct and holds only its options; every call
/// to [`Engine::validate`] runs the full pipeline against a fresh context.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: ValidationOptions,
}

impl Engine {
    /// Create an engine with the given options.
    pub fn new(options: ValidationOptions) -> Self {
        Self { options }
    }

    /// The options this engine runs with.
    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Validate in-memory CSV text.
    ///
    /// Never returns `Err`: data-quality findings accumulate in the
    /// report, cancellation yields a `CANCELLED` error payload, and any
    /// unexpected internal fault is converted to `PROCESSING_ERROR`.
    pub fn validate(&self, text: &str) -> ValidationResult {
        self.validate_with(text, RunHooks::default())
    }

    /// Validate with progress/cancellation hooks.
    pub fn validate_with(&self, text: &str, hooks: RunHooks<'_>) -> ValidationResult {
        let started = Instant::now();
        match self.run(text, &hooks, started) {
            Ok(result) => result,
            Err(AssayError::Cancelled) => self.cancelled_result(),
            Err(fault) => self.processing_error_result(&fault),
        }
    }

    /// The pipeline proper. `Err` here means a genuine fault, not a
    /// data-quality finding.
    fn run(
        &self,
        text: &str,
        hooks: &RunHooks<'_>,
        started: Instant,
    ) -> Result<ValidationResult> {
        self.options.check()?;
        let opts = &self.options;

        // Hard stops: exactly one error, no data, no further analysis.
        if let Some(max) = opts.max_file_size {
            if text.len() > max {
                return Ok(self.hard_stop(
                    text,
                    IssueCode::FileTooLarge,
                    format!(
                        "Input is {} bytes, exceeding the {} byte limit",
                        text.len(),
                        max
                    ),
                    "Raise maxFileSize or split the input",
                    started,
                ));
            }
        }
        if text.trim().is_empty() {
            return Ok(self.hard_stop(
                text,
                IssueCode::EmptyFile,
                "Input contains no data".to_string(),
                "Provide non-empty CSV text",
                started,
            ));
        }

        let mut ctx = ValidationContext::new();
        ctx.file_stats.file_size_bytes = text.len();
        ctx.file_stats.line_ending_kind = detect_line_endings(text);

        let lines: Vec<&str> = text.lines().collect();
        let delimiter = match opts.delimiter {
            Some(d) => d,
            None => match detect_delimiter(&lines, opts.quote_char) {
                Some(d) => d,
                None => {
                    ctx.push_issue(
                        ValidationIssue::new(
                            IssueKind::Structure,
                            Severity::Warning,
                            IssueCode::NoDelimiterDetected,
                            "No delimiter could be detected; defaulting to comma",
                        )
                        .with_suggestion("Pass the delimiter explicitly"),
                    );
                    ','
                }
            },
        };
        ctx.file_stats.detected_delimiter = Some(delimiter);
        debug!(delimiter = %delimiter, "delimiter selected");

        let tokenizer = Tokenizer::new(delimiter, opts.quote_char);
        let outcome = tokenizer.tokenize_with(
            text,
            TokenizeHooks {
                progress: hooks.progress,
                progress_interval: opts.streaming.map(|s| s.chunk_size).unwrap_or(0),
                cancel: hooks.cancel,
            },
        )?;

        let mut rows = outcome.rows;
        if opts.trim_whitespace {
            for row in &mut rows {
                for cell in row.iter_mut() {
                    if cell.trim().len() != cell.len() {
                        *cell = cell.trim().to_string();
                    }
                }
            }
        }

        let (headers, data_rows) = if opts.has_header && !rows.is_empty() {
            let headers = rows.remove(0);
            (headers, rows)
        } else {
            let width = rows.first().map(|r| r.len()).unwrap_or(0);
            (Table::generated_headers(width), rows)
        };

        if let Some(max) = opts.max_rows {
            if data_rows.len() > max {
                return Ok(self.hard_stop(
                    text,
                    IssueCode::TooManyRows,
                    format!(
                        "Input has {} data rows, exceeding the {} row limit",
                        data_rows.len(),
                        max
                    ),
                    "Raise maxRows or split the input",
                    started,
                ));
            }
        }

        let table = Table::new(headers, data_rows);
        ctx.file_stats.total_rows = table.row_count();
        debug!(
            rows = table.row_count(),
            columns = table.column_count(),
            "tokenization complete"
        );

        if opts.has_header {
            let (header_analysis, header_issues) =
                StructureValidator::validate_headers(&table.headers, &opts.required_columns);
            ctx.header_analysis = header_analysis;
            for issue in header_issues {
                ctx.push_issue(issue);
            }
        } else {
            ctx.header_analysis.has_headers = false;
            ctx.header_analysis.headers = table.headers.clone();
        }

        let (row_analysis, row_issues) =
            StructureValidator::validate_rows(&table, opts.has_header, &outcome.quoting_issues);
        ctx.row_analysis = row_analysis;
        for issue in row_issues {
            ctx.push_issue(issue);
        }

        let nulls = opts.null_matcher();
        let analyzer = ColumnAnalyzer::new(&nulls, opts.sample_seed, opts.strict_mode);
        let (analyses, type_issues) = analyzer.analyze(&table);
        ctx.column_analysis = analyses;
        for issue in type_issues {
            ctx.push_issue(issue);
        }

        let profiler = Profiler {
            outlier_detection: opts.outlier_detection,
            enable_profiling: opts.enable_profiling,
            calculate_correlations: opts.calculate_correlations,
        };
        let (profile, profile_issues) = profiler.profile(&table, &mut ctx.column_analysis, &nulls);
        ctx.profile = profile;
        for issue in profile_issues {
            ctx.push_issue(issue);
        }

        ctx.analytics.data_quality_score = quality_score(
            ctx.error_count(),
            ctx.warning_count(),
            ctx.avg_type_confidence(),
            ctx.avg_null_rate(),
        );
        ctx.analytics.recommended_actions = recommendations(&ctx);
        ctx.analytics.memory_usage_mb = estimate_memory_mb(text);
        ctx.analytics.processing_time_ms = started.elapsed().as_millis() as u64;
        debug!(
            score = ctx.analytics.data_quality_score,
            errors = ctx.error_count(),
            warnings = ctx.warning_count(),
            "analysis complete"
        );

        Ok(self.assemble(ctx, &table, text))
    }

    /// Merge the populated context and table into the final report.
    fn assemble(&self, ctx: ValidationContext, table: &Table, text: &str) -> ValidationResult {
        let opts = &self.options;
        let success = ctx.errors.is_empty();
        let is_valid = success && ctx.file_stats.total_rows > 0;
        let error = ctx.first_error().map(ErrorPayload::from_issue);

        let dry_run_summary = if opts.dry_run {
            Some(self.dry_run_summary(&ctx, table))
        } else {
            None
        };
        let data = if opts.dry_run {
            None
        } else {
            Some(self.materialize(table))
        };

        let summary = ValidationSummary {
            total_rows: ctx.file_stats.total_rows,
            total_columns: table.column_count(),
            error_count: ctx.error_count(),
            warning_count: ctx.warning_count(),
            data_quality_score: ctx.analytics.data_quality_score,
        };

        let metadata = match opts.metadata_level {
            MetadataLevel::None => None,
            MetadataLevel::Summary => Some(ValidationMetadata {
                summary,
                context: None,
                fingerprint: None,
                analyzed_at: None,
            }),
            MetadataLevel::Detailed => Some(ValidationMetadata {
                summary,
                context: Some(ctx),
                fingerprint: Some(fingerprint(text)),
                analyzed_at: Some(Utc::now()),
            }),
        };

        ValidationResult {
            success,
            is_valid,
            data,
            metadata,
            error,
            dry_run_summary,
            audit_id: Uuid::new_v4(),
        }
    }

    /// Materialize returned rows, honoring output shape and field pruning.
    fn materialize(&self, table: &Table) -> OutputData {
        let opts = &self.options;
        let indices: Vec<usize> = match &opts.output_fields {
            Some(fields) => table
                .headers
                .iter()
                .enumerate()
                .filter(|(_, h)| fields.iter().any(|f| f.eq_ignore_ascii_case(h.as_str())))
                .map(|(idx, _)| idx)
                .collect(),
            None => (0..table.column_count()).collect(),
        };

        if opts.return_objects {
            let objects = table
                .rows
                .iter()
                .map(|row| {
                    let mut object = IndexMap::new();
                    for &idx in &indices {
                        object.insert(
                            table.headers[idx].clone(),
                            row.get(idx).cloned().unwrap_or_default(),
                        );
                    }
                    object
                })
                .collect();
            OutputData::Objects(objects)
        } else {
            let rows = table
                .rows
                .iter()
                .map(|row| {
                    indices
                        .iter()
                        .map(|&idx| row.get(idx).cloned().unwrap_or_default())
                        .collect()
                })
                .collect();
            OutputData::Rows(rows)
        }
    }

    /// Describe what a non-dry run would have returned.
    fn dry_run_summary(&self, ctx: &ValidationContext, table: &Table) -> String {
        let opts = &self.options;
        let mut parts = vec![format!(
            "{} row(s) x {} column(s) would be returned",
            table.row_count(),
            table.column_count()
        )];
        if let Some(ref fields) = opts.output_fields {
            parts.push(format!("output limited to fields: {}", fields.join(", ")));
        }
        if opts.return_objects {
            parts.push("rows would be returned as objects".to_string());
        }
        parts.push(format!(
            "{} error(s) and {} warning(s) found",
            ctx.error_count(),
            ctx.warning_count()
        ));
        format!("Dry run: {}", parts.join("; "))
    }

    /// Build the single-error result for limit violations and empty input.
    fn hard_stop(
        &self,
        text: &str,
        code: IssueCode,
        message: String,
        suggestion: &str,
        started: Instant,
    ) -> ValidationResult {
        let issue = ValidationIssue::new(IssueKind::File, Severity::Error, code, message)
            .with_suggestion(suggestion);
        let error = Some(ErrorPayload::from_issue(&issue));

        let mut ctx = ValidationContext::new();
        ctx.file_stats.file_size_bytes = text.len();
        ctx.push_issue(issue);
        ctx.analytics.data_quality_score = quality_score(
            ctx.error_count(),
            ctx.warning_count(),
            ctx.avg_type_confidence(),
            ctx.avg_null_rate(),
        );
        ctx.analytics.recommended_actions = recommendations(&ctx);
        ctx.analytics.memory_usage_mb = estimate_memory_mb(text);
        ctx.analytics.processing_time_ms = started.elapsed().as_millis() as u64;

        let summary = ValidationSummary {
            total_rows: 0,
            total_columns: 0,
            error_count: 1,
            warning_count: 0,
            data_quality_score: ctx.analytics.data_quality_score,
        };

        let metadata = match self.options.metadata_level {
            MetadataLevel::None => None,
            MetadataLevel::Summary => Some(ValidationMetadata {
                summary,
                context: None,
                fingerprint: None,
                analyzed_at: None,
            }),
            MetadataLevel::Detailed => Some(ValidationMetadata {
                summary,
                context: Some(ctx),
                fingerprint: Some(fingerprint(text)),
                analyzed_at: Some(Utc::now()),
            }),
        };

        ValidationResult {
            success: false,
            is_valid: false,
            data: None,
            metadata,
            error,
            dry_run_summary: None,
            audit_id: Uuid::new_v4(),
        }
    }

    /// The dedicated cancellation result; never a partial report.
    fn cancelled_result(&self) -> ValidationResult {
        ValidationResult {
            success: false,
            is_valid: false,
            data: None,
            metadata: None,
            error: Some(ErrorPayload {
                code: IssueCode::Cancelled,
                message: "Validation was cancelled before completion".to_string(),
                suggested_action: Some("Re-run the validation without cancelling".to_string()),
            }),
            dry_run_summary: None,
            audit_id: Uuid::new_v4(),
        }
    }

    /// Boundary conversion for genuinely unexpected faults.
    fn processing_error_result(&self, fault: &AssayError) -> ValidationResult {
        ValidationResult {
            success: false,
            is_valid: false,
            data: None,
            metadata: None,
            error: Some(ErrorPayload {
                code: IssueCode::ProcessingError,
                message: fault.to_string(),
                suggested_action: Some("Check the options passed to the engine".to_string()),
            }),
            dry_run_summary: None,
            audit_id: Uuid::new_v4(),
        }
    }
}

/// Incremental validation over chunked input.
///
/// Chunks are appended in caller order; each push runs a cheap dry-run
/// re-analysis of the accumulated buffer for progress feedback, and
/// [`StreamingSession::finish`] runs the one authoritative validation.
#[derive(Debug, Clone)]
pub struct StreamingSession {
    options: ValidationOptions,
    buffer: String,
}

impl StreamingSession {
    /// Start a session with the options the final validation will use.
    pub fn new(options: ValidationOptions) -> Self {
        Self {
            options,
            buffer: String::new(),
        }
    }

    /// Append a chunk and re-analyze the buffer so far.
    ///
    /// The interim result is advisory: profiling, correlation, and outlier
    /// work is skipped and no data is materialized.
    pub fn push(&mut self, chunk: &str) -> ValidationResult {
        self.buffer.push_str(chunk);
        let interim = ValidationOptions {
            dry_run: true,
            enable_profiling: false,
            calculate_correlations: false,
            outlier_detection: false,
            metadata_level: MetadataLevel::Summary,
            ..self.options.clone()
        };
        Engine::new(interim).validate(&self.buffer)
    }

    /// Bytes buffered so far.
    pub fn buffered_bytes(&self) -> usize {
        self.buffer.len()
    }

    /// Run the authoritative validation over the full buffer.
    pub fn finish(self) -> ValidationResult {
        Engine::new(self.options).validate(&self.buffer)
    }
}

/// SHA-256 fingerprint of the raw input.
fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("sha256:{:x}", hasher.finalize())
}

/// Coarse estimate of peak working memory for the run.
fn estimate_memory_mb(text: &str) -> f64 {
    let bytes = text.len() * 2;
    let mb = bytes as f64 / (1024.0 * 1024.0);
    (mb * 100.0).round() / 100.0
}
