//! Validate command - run the engine against a file and render the report.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;

use assay::{Engine, Severity, ValidationOptions, ValidationResult};

use crate::cli::MetadataChoice;

/// Arguments collected from the command line.
pub struct Args {
    pub file: PathBuf,
    pub json: bool,
    pub delimiter: Option<char>,
    pub no_header: bool,
    pub strict: bool,
    pub profile: bool,
    pub outliers: bool,
    pub correlations: bool,
    pub required: Vec<String>,
    pub metadata: MetadataChoice,
    pub max_rows: Option<usize>,
    pub max_file_size: Option<usize>,
    pub dry_run: bool,
    pub verbose: bool,
}

/// Run validation; `Ok(false)` signals a failed report (exit code 1).
pub fn run(args: Args) -> Result<bool, Box<dyn std::error::Error>> {
    if !args.file.exists() {
        return Err(format!("File not found: {}", args.file.display()).into());
    }

    let text = fs::read_to_string(&args.file)?;

    let options = ValidationOptions {
        delimiter: args.delimiter,
        has_header: !args.no_header,
        strict_mode: args.strict,
        enable_profiling: args.profile,
        outlier_detection: args.outliers,
        calculate_correlations: args.correlations,
        required_columns: args.required,
        metadata_level: args.metadata.into(),
        max_rows: args.max_rows,
        max_file_size: args.max_file_size,
        dry_run: args.dry_run,
        ..ValidationOptions::default()
    };

    let result = Engine::new(options).validate(&text);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        render(&args.file, &result, args.verbose);
    }

    Ok(result.success)
}

/// Human-readable rendering of the report.
fn render(file: &PathBuf, result: &ValidationResult, verbose: bool) {
    println!(
        "{} {}",
        "Validating".cyan().bold(),
        file.display().to_string().white()
    );

    if let Some(ref metadata) = result.metadata {
        let summary = &metadata.summary;
        println!(
            "{} rows x {} columns, quality score {}",
            summary.total_rows.to_string().white().bold(),
            summary.total_columns.to_string().white().bold(),
            format!("{}/100", summary.data_quality_score).white().bold()
        );
        println!(
            "{} error(s), {} warning(s)",
            summary.error_count.to_string().red(),
            summary.warning_count.to_string().yellow()
        );

        if let Some(ref ctx) = metadata.context {
            if verbose {
                println!();
                println!("{}", "Columns:".yellow().bold());
                for (name, analysis) in &ctx.column_analysis {
                    println!(
                        "  {:20} {:12} confidence {:.2}, {} null(s)",
                        name,
                        analysis.inferred_type.as_str(),
                        analysis.type_confidence,
                        analysis.null_count
                    );
                }
            }

            let issues = ctx.errors.iter().chain(ctx.warnings.iter());
            let mut printed = 0;
            for issue in issues {
                if !verbose && printed >= 10 {
                    println!("  ...");
                    break;
                }
                let label = match issue.severity {
                    Severity::Error => issue.severity.label().red().bold(),
                    Severity::Warning => issue.severity.label().yellow(),
                    Severity::Info => issue.severity.label().blue(),
                };
                println!("  {:8} [{}] {}", label, issue.code.as_str(), issue.message);
                printed += 1;
            }

            if !ctx.analytics.recommended_actions.is_empty() {
                println!();
                println!("{}", "Recommendations:".yellow().bold());
                for action in &ctx.analytics.recommended_actions {
                    println!("  - {}", action);
                }
            }
        }
    }

    if let Some(ref summary) = result.dry_run_summary {
        println!("{}", summary);
    }

    if let Some(ref error) = result.error {
        println!(
            "{} [{}] {}",
            "Failed:".red().bold(),
            error.code.as_str(),
            error.message
        );
        if let Some(ref action) = error.suggested_action {
            println!("  {}", action);
        }
    } else {
        println!("{}", "OK".green().bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args_for(file: PathBuf) -> Args {
        Args {
            file,
            json: true,
            delimiter: None,
            no_header: false,
            strict: false,
            profile: false,
            outliers: false,
            correlations: false,
            required: Vec::new(),
            metadata: MetadataChoice::Detailed,
            max_rows: None,
            max_file_size: None,
            dry_run: false,
            verbose: false,
        }
    }

    #[test]
    fn test_run_clean_file_succeeds() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"a,b\n1,2\n3,4\n").unwrap();

        let ok = run(args_for(file.path().to_path_buf())).unwrap();
        assert!(ok);
    }

    #[test]
    fn test_run_duplicate_headers_fails() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"a,a\n1,2\n").unwrap();

        let ok = run(args_for(file.path().to_path_buf())).unwrap();
        assert!(!ok);
    }

    #[test]
    fn test_run_missing_file_is_an_error() {
        let result = run(args_for(PathBuf::from("/nonexistent/input.csv")));
        assert!(result.is_err());
    }
}
