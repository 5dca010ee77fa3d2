//! Delimiter and line-ending detection.
//!
//! Detection runs before full tokenization on a small sample of lines.
//! Each candidate delimiter is scored by how consistently it splits the
//! sample; the modal column count must exceed one for a candidate to score
//! at full weight.

use crate::report::LineEndingKind;

/// Candidate delimiters in priority order (ties resolve to the earlier one).
pub const DELIMITER_CANDIDATES: &[char] = &[',', ';', '\t', '|', ':'];

/// Lines inspected when auto-detecting.
const SAMPLE_LINES: usize = 20;

/// Penalty applied when a candidate's modal column count is 1.
const SINGLE_COLUMN_PENALTY: f64 = 0.5;

/// Detect the delimiter from sample lines.
///
/// Returns `None` when no candidate yields more than one column anywhere,
/// in which case the caller defaults to comma and records a
/// `NO_DELIMITER_DETECTED` warning.
pub fn detect_delimiter(lines: &[&str], quote: char) -> Option<char> {
    let sample: Vec<&str> = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .take(SAMPLE_LINES)
        .copied()
        .collect();

    if sample.is_empty() {
        return None;
    }

    let mut best: Option<(char, f64)> = None;
    let mut any_multi_column = false;

    for &candidate in DELIMITER_CANDIDATES {
        let counts: Vec<usize> = sample
            .iter()
            .map(|line| field_count(line, candidate, quote))
            .collect();

        let modal = modal_count(&counts);
        if modal > 1 {
            any_multi_column = true;
        }

        let matching = counts.iter().filter(|&&c| c == modal).count();
        let mut score = matching as f64 / counts.len() as f64;
        if modal <= 1 {
            score *= SINGLE_COLUMN_PENALTY;
        }

        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((candidate, score)),
        }
    }

    if !any_multi_column {
        return None;
    }

    best.map(|(delimiter, _)| delimiter)
}

/// Count the fields a delimiter-only, quote-aware split would produce.
fn field_count(line: &str, delimiter: char, quote: char) -> usize {
    let mut fields = 1;
    let mut in_quotes = false;

    for c in line.chars() {
        if c == quote {
            in_quotes = !in_quotes;
        } else if c == delimiter && !in_quotes {
            fields += 1;
        }
    }

    fields
}

/// Most frequent column count (larger count wins a frequency tie).
fn modal_count(counts: &[usize]) -> usize {
    let mut freq: Vec<(usize, usize)> = Vec::new();
    for &c in counts {
        match freq.iter_mut().find(|(value, _)| *value == c) {
            Some((_, n)) => *n += 1,
            None => freq.push((c, 1)),
        }
    }

    freq.into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)))
        .map(|(value, _)| value)
        .unwrap_or(0)
}

/// Characterize the line endings of the raw input.
///
/// Exactly one kind present reports that kind; more than one reports
/// `Mixed`; none reports `Unknown`.
pub fn detect_line_endings(text: &str) -> LineEndingKind {
    let bytes = text.as_bytes();
    let mut crlf = 0usize;
    let mut lf = 0usize;
    let mut cr = 0usize;

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                if i + 1 < bytes.len() && bytes[i + 1] == b'\n' {
                    crlf += 1;
                    i += 2;
                    continue;
                }
                cr += 1;
            }
            b'\n' => lf += 1,
            _ => {}
        }
        i += 1;
    }

    let kinds_present = [crlf, lf, cr].iter().filter(|&&n| n > 0).count();
    match kinds_present {
        0 => LineEndingKind::Unknown,
        1 if crlf > 0 => LineEndingKind::Crlf,
        1 if lf > 0 => LineEndingKind::Lf,
        1 => LineEndingKind::Cr,
        _ => LineEndingKind::Mixed,
    }
}
