//! Detect command - report the sniffed dialect without full validation.

use std::fs;
use std::path::Path;

use colored::Colorize;

use assay::input::{detect_delimiter, detect_line_endings, Tokenizer};
use assay::LineEndingKind;

/// Sniff a file's delimiter, line endings, and column count.
pub fn run(file: &Path) -> Result<bool, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let text = fs::read_to_string(file)?;
    let lines: Vec<&str> = text.lines().collect();

    let delimiter = detect_delimiter(&lines, '"');
    let line_endings = detect_line_endings(&text);

    println!(
        "{} {}",
        "Detecting".cyan().bold(),
        file.display().to_string().white()
    );

    match delimiter {
        Some(d) => println!("delimiter:    {} ({})", delimiter_name(d), d.escape_debug()),
        None => println!("delimiter:    {}", "not detected".yellow()),
    }
    println!("line endings: {}", line_ending_name(line_endings));

    if let Some(d) = delimiter {
        let sample: String = lines
            .iter()
            .filter(|l| !l.trim().is_empty())
            .take(20)
            .copied()
            .collect::<Vec<_>>()
            .join("\n");
        let outcome = Tokenizer::new(d, '"').tokenize(&sample)?;
        if let Some(width) = modal_width(&outcome.rows) {
            println!("columns:      {}", width);
        }
    }

    Ok(true)
}

fn delimiter_name(delimiter: char) -> &'static str {
    match delimiter {
        ',' => "comma",
        ';' => "semicolon",
        '\t' => "tab",
        '|' => "pipe",
        ':' => "colon",
        _ => "other",
    }
}

fn line_ending_name(kind: LineEndingKind) -> &'static str {
    match kind {
        LineEndingKind::Crlf => "CRLF",
        LineEndingKind::Lf => "LF",
        LineEndingKind::Cr => "CR",
        LineEndingKind::Mixed => "mixed",
        LineEndingKind::Unknown => "unknown",
    }
}

/// Most frequent row width in the sample.
fn modal_width(rows: &[Vec<String>]) -> Option<usize> {
    let mut freq: Vec<(usize, usize)> = Vec::new();
    for row in rows {
        match freq.iter_mut().find(|(width, _)| *width == row.len()) {
            Some((_, n)) => *n += 1,
            None => freq.push((row.len(), 1)),
        }
    }
    freq.into_iter().max_by_key(|(_, n)| *n).map(|(w, _)| w)
}
