//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use assay::MetadataLevel;

/// Assay: CSV validation and quality analysis
#[derive(Parser)]
#[command(name = "assay")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a CSV file and report quality findings
    Validate {
        /// Path to the CSV file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,

        /// Field delimiter (auto-detected when omitted)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Treat the first row as data, not headers
        #[arg(long)]
        no_header: bool,

        /// Escalate type inconsistencies to errors
        #[arg(long)]
        strict: bool,

        /// Run the format-pattern catalog
        #[arg(long)]
        profile: bool,

        /// Detect IQR/length outliers
        #[arg(long)]
        outliers: bool,

        /// Compute correlations between numeric columns
        #[arg(long)]
        correlations: bool,

        /// Columns that must be present (comma-separated)
        #[arg(long, value_delimiter = ',')]
        required: Vec<String>,

        /// Metadata tier included in the report
        #[arg(long, value_enum, default_value = "detailed")]
        metadata: MetadataChoice,

        /// Hard cap on data rows
        #[arg(long)]
        max_rows: Option<usize>,

        /// Hard cap on input bytes
        #[arg(long)]
        max_file_size: Option<usize>,

        /// Analyze without materializing output data
        #[arg(long)]
        dry_run: bool,
    },

    /// Detect the delimiter and line endings without full validation
    Detect {
        /// Path to the CSV file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

/// Metadata tier choices exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetadataChoice {
    None,
    Summary,
    Detailed,
}

impl From<MetadataChoice> for MetadataLevel {
    fn from(choice: MetadataChoice) -> Self {
        match choice {
            MetadataChoice::None => MetadataLevel::None,
            MetadataChoice::Summary => MetadataLevel::Summary,
            MetadataChoice::Detailed => MetadataLevel::Detailed,
        }
    }
}
