//! End-to-end tests for the validation engine.

use assay::{
    validate_csv, IssueCode, MetadataLevel, OutputData, ValidationContext, ValidationOptions,
    ValidationResult, ValueType,
};

fn detailed() -> ValidationOptions {
    ValidationOptions {
        metadata_level: MetadataLevel::Detailed,
        ..ValidationOptions::default()
    }
}

fn context(result: &ValidationResult) -> &ValidationContext {
    result
        .metadata
        .as_ref()
        .and_then(|m| m.context.as_ref())
        .expect("detailed metadata requested")
}

#[test]
fn clean_csv_produces_clean_report() {
    let result = validate_csv("a,b,c\n1,2,3\n4,5,6", detailed());

    assert!(result.success);
    assert!(result.is_valid);
    let ctx = context(&result);
    assert_eq!(ctx.file_stats.detected_delimiter, Some(','));
    assert_eq!(ctx.header_analysis.headers, vec!["a", "b", "c"]);
    assert_eq!(ctx.file_stats.total_rows, 2);
    assert!(ctx.errors.is_empty());

    for analysis in ctx.column_analysis.values() {
        assert_eq!(analysis.inferred_type, ValueType::Integer);
        assert!((analysis.type_confidence - 1.0).abs() < f64::EPSILON);
    }
}

#[test]
fn iqr_outlier_is_reported_when_enabled() {
    let options = ValidationOptions {
        outlier_detection: true,
        metadata_level: MetadataLevel::Detailed,
        ..ValidationOptions::default()
    };
    let result = validate_csv("n\n10\n12\n11\n13\n1000", options);

    let profile = context(&result).profile.as_ref().expect("profile");
    assert_eq!(profile.outliers.len(), 1);
    assert_eq!(profile.outliers[0].column, "n");
    assert_eq!(profile.outliers[0].value, "1000");
    assert!(profile.outliers[0].reason.contains("IQR fence"));
}

#[test]
fn outliers_absent_when_disabled() {
    let result = validate_csv("n\n10\n12\n11\n13\n1000", detailed());
    assert!(context(&result).profile.is_none());
}

#[test]
fn max_file_size_short_circuits_with_one_error() {
    let options = ValidationOptions {
        max_file_size: Some(5),
        metadata_level: MetadataLevel::Detailed,
        ..ValidationOptions::default()
    };
    let result = validate_csv("a,b,c\n1,2,3\n4,5,6", options);

    assert!(!result.success);
    assert!(!result.is_valid);
    assert!(result.data.is_none());
    assert_eq!(result.error.as_ref().unwrap().code, IssueCode::FileTooLarge);

    let ctx = context(&result);
    assert_eq!(ctx.errors.len(), 1);
    assert!(ctx.warnings.is_empty());
}

#[test]
fn trailing_unclosed_quote_references_last_row() {
    let result = validate_csv("h\n\"abc,\"def", detailed());

    let ctx = context(&result);
    let unclosed: Vec<_> = ctx
        .errors
        .iter()
        .filter(|i| i.code == IssueCode::UnclosedQuote)
        .collect();
    assert_eq!(unclosed.len(), 1);
    // The partial row is appended, not discarded.
    assert_eq!(ctx.file_stats.total_rows, 1);
    assert_eq!(unclosed[0].location.unwrap().row, 0);
    assert!(!result.success);
}

#[test]
fn score_stays_in_range_and_decreases_with_issues() {
    let clean = validate_csv("a,b\n1,2\n3,4", detailed());
    let clean_score = context(&clean).analytics.data_quality_score;
    assert!(clean_score <= 100);

    // Same shape plus an empty row warning.
    let warned = validate_csv("a,b\n1,2\n,\n3,4", detailed());
    let warned_score = context(&warned).analytics.data_quality_score;
    assert!(warned_score < clean_score);

    // Duplicate headers add an error on top.
    let errored = validate_csv("a,a\n1,2\n,\n3,4", detailed());
    let errored_score = context(&errored).analytics.data_quality_score;
    assert!(errored_score < warned_score);
}

#[test]
fn identical_runs_are_idempotent() {
    let options = ValidationOptions {
        metadata_level: MetadataLevel::Detailed,
        enable_profiling: true,
        outlier_detection: true,
        calculate_correlations: true,
        ..ValidationOptions::default()
    };
    let text = "id,x,y\n1,10,100\n2,20,200\n3,30,290\n4,40,410\n5,oops,500";

    let a = validate_csv(text, options.clone());
    let b = validate_csv(text, options);

    assert_ne!(a.audit_id, b.audit_id);
    let (ctx_a, ctx_b) = (context(&a), context(&b));
    assert_eq!(
        serde_json::to_value(&ctx_a.errors).unwrap(),
        serde_json::to_value(&ctx_b.errors).unwrap()
    );
    assert_eq!(
        serde_json::to_value(&ctx_a.warnings).unwrap(),
        serde_json::to_value(&ctx_b.warnings).unwrap()
    );
    assert_eq!(
        serde_json::to_value(&ctx_a.column_analysis).unwrap(),
        serde_json::to_value(&ctx_b.column_analysis).unwrap()
    );
    assert_eq!(
        serde_json::to_value(&ctx_a.profile).unwrap(),
        serde_json::to_value(&ctx_b.profile).unwrap()
    );
    assert_eq!(
        ctx_a.analytics.data_quality_score,
        ctx_b.analytics.data_quality_score
    );
}

#[test]
fn duplicate_headers_are_an_error() {
    let result = validate_csv("a,a,b\n1,2,3", detailed());

    assert!(!result.success);
    let ctx = context(&result);
    assert_eq!(ctx.header_analysis.duplicate_headers, vec!["a"]);
    assert_eq!(
        ctx.errors
            .iter()
            .filter(|i| i.code == IssueCode::DuplicateHeader)
            .count(),
        1
    );
    assert_eq!(result.error.unwrap().code, IssueCode::DuplicateHeader);
}

#[test]
fn required_columns_checked_case_insensitively() {
    let options = ValidationOptions {
        required_columns: vec!["ID".to_string(), "email".to_string()],
        metadata_level: MetadataLevel::Detailed,
        ..ValidationOptions::default()
    };
    let result = validate_csv("id,name\n1,Alice", options);

    let ctx = context(&result);
    assert_eq!(ctx.header_analysis.missing_required_columns, vec!["email"]);
    assert!(ctx
        .errors
        .iter()
        .any(|i| i.code == IssueCode::MissingRequiredColumn));
}

#[test]
fn semicolon_delimiter_is_detected() {
    let result = validate_csv("a;b;c\n1;2;3\n4;5;6", detailed());
    assert_eq!(context(&result).file_stats.detected_delimiter, Some(';'));
    assert!(result.success);
}

#[test]
fn explicit_delimiter_overrides_detection() {
    let options = ValidationOptions {
        delimiter: Some('|'),
        metadata_level: MetadataLevel::Detailed,
        ..ValidationOptions::default()
    };
    let result = validate_csv("a|b\n1|2", options);
    assert_eq!(context(&result).file_stats.detected_delimiter, Some('|'));
    assert_eq!(context(&result).header_analysis.headers, vec!["a", "b"]);
}

#[test]
fn strict_mode_escalates_type_findings() {
    let lenient = validate_csv("n\n1\n2\nx\n4", detailed());
    assert!(lenient.success);
    assert!(context(&lenient)
        .warnings
        .iter()
        .any(|i| i.code == IssueCode::TypeInconsistency));

    let strict_options = ValidationOptions {
        strict_mode: true,
        metadata_level: MetadataLevel::Detailed,
        ..ValidationOptions::default()
    };
    let strict = validate_csv("n\n1\n2\nx\n4", strict_options);
    assert!(!strict.success);
    assert!(context(&strict)
        .errors
        .iter()
        .any(|i| i.code == IssueCode::TypeMismatch));
}

#[test]
fn custom_null_values_respected() {
    let options = ValidationOptions {
        null_values: vec!["missing".to_string(), "".to_string()],
        metadata_level: MetadataLevel::Detailed,
        ..ValidationOptions::default()
    };
    let result = validate_csv("v\n1\nmissing\n3\n", options);
    let ctx = context(&result);
    assert_eq!(ctx.column_analysis["v"].null_count, 1);
    assert_eq!(ctx.column_analysis["v"].inferred_type, ValueType::Integer);
}

#[test]
fn correlations_present_for_two_numeric_columns() {
    let options = ValidationOptions {
        calculate_correlations: true,
        metadata_level: MetadataLevel::Detailed,
        ..ValidationOptions::default()
    };
    let result = validate_csv("x,y\n1,2\n2,4\n3,6\n4,8", options);
    let correlations = context(&result)
        .profile
        .as_ref()
        .and_then(|p| p.correlations.as_ref())
        .expect("correlations");
    assert!((correlations["x"]["y"] - 1.0).abs() < 1e-9);
}

#[test]
fn pattern_profiling_tallies_formats() {
    let options = ValidationOptions {
        enable_profiling: true,
        metadata_level: MetadataLevel::Detailed,
        ..ValidationOptions::default()
    };
    let result = validate_csv(
        "email,joined\na@example.com,2024-01-15\nb@example.com,2024-02-20",
        options,
    );
    let profile = context(&result).profile.as_ref().expect("profile");
    assert_eq!(profile.patterns.get("email"), Some(&2));
    assert_eq!(profile.patterns.get("isoDate"), Some(&2));
}

#[test]
fn embedded_newlines_do_not_split_rows() {
    let result = validate_csv("id,note\n1,\"first\nsecond\"\n2,plain", detailed());
    assert!(result.success);
    assert_eq!(context(&result).file_stats.total_rows, 2);
    match result.data.unwrap() {
        OutputData::Rows(rows) => assert_eq!(rows[0][1], "first\nsecond"),
        OutputData::Objects(_) => panic!("expected rows"),
    }
}

#[test]
fn empty_rows_warned_not_errored() {
    let result = validate_csv("a,b\n1,2\n,\n3,4", detailed());
    assert!(result.success);
    let ctx = context(&result);
    assert_eq!(ctx.row_analysis.empty_row_indices, vec![1]);
    assert!(ctx.warnings.iter().any(|i| i.code == IssueCode::EmptyRow));
}

#[test]
fn header_only_input_is_not_valid() {
    let result = validate_csv("a,b,c", detailed());
    // No errors, but no data rows either.
    assert!(result.success);
    assert!(!result.is_valid);
    assert_eq!(context(&result).file_stats.total_rows, 0);
}

#[test]
fn result_serializes_with_camel_case_keys() {
    let result = validate_csv("a,b\n1,2", detailed());
    let json = serde_json::to_value(&result).unwrap();

    assert!(json.get("isValid").is_some());
    assert!(json.get("auditId").is_some());
    let stats = &json["metadata"]["context"]["fileStats"];
    assert_eq!(stats["detectedDelimiter"], ",");
    assert!(stats.get("lineEndingKind").is_some());
    let analytics = &json["metadata"]["context"]["analytics"];
    assert!(analytics.get("memoryUsageMB").is_some());
    assert!(analytics.get("dataQualityScore").is_some());
}

mod properties {
    use super::*;
    use assay::input::Tokenizer;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn tokenizer_never_panics(text in ".{0,400}") {
            let _ = Tokenizer::new(',', '"').tokenize(&text);
        }

        #[test]
        fn engine_always_returns_well_formed_result(text in ".{0,400}") {
            let result = validate_csv(&text, ValidationOptions::default());
            // success implies an empty error payload and vice versa.
            prop_assert_eq!(result.success, result.error.is_none());
        }

        #[test]
        fn score_always_in_range(errors in 0usize..20, warnings in 0usize..20,
                                 confidence in 0.0f64..1.0, null_rate in 0.0f64..1.0) {
            let score = assay::score::quality_score(errors, warnings, confidence, null_rate);
            prop_assert!(score <= 100);
        }

        #[test]
        fn tokenizer_row_roundtrip_simple_cells(cells in proptest::collection::vec("[a-z0-9]{1,8}", 1..6)) {
            let line = cells.join(",");
            let outcome = Tokenizer::new(',', '"').tokenize(&line).unwrap();
            prop_assert_eq!(outcome.rows.len(), 1);
            let expected: Vec<String> = cells;
            prop_assert_eq!(&outcome.rows[0], &expected);
        }
    }
}
