//! Assay CLI - CSV validation and quality analysis.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = match cli.command {
        Commands::Validate {
            file,
            json,
            delimiter,
            no_header,
            strict,
            profile,
            outliers,
            correlations,
            required,
            metadata,
            max_rows,
            max_file_size,
            dry_run,
        } => commands::validate::run(commands::validate::Args {
            file,
            json,
            delimiter,
            no_header,
            strict,
            profile,
            outliers,
            correlations,
            required,
            metadata,
            max_rows,
            max_file_size,
            dry_run,
            verbose: cli.verbose,
        }),

        Commands::Detect { file } => commands::detect::run(&file),
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
