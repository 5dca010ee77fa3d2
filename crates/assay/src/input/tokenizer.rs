//! Quote-aware tokenizer for delimited text.
//!
//! A single left-to-right scan with two states, `unquoted` and `quoted`.
//! Inside quotes a doubled quote is an escaped literal, row terminators are
//! field content, and a lone quote closes the field only when followed by a
//! delimiter, a row terminator, or end of input. Outside quotes `\r\n`,
//! lone `\n`, and lone `\r` all end a row. The scanner never discards
//! input: a scan ending inside a quoted field appends the partial row and
//! records an unclosed-quote issue against it.

use crate::cancel::CancelToken;
use crate::error::{AssayError, Result};
use crate::report::{QuoteIssueKind, QuotingIssue};

/// Characters processed between progress callbacks when none is configured.
const DEFAULT_PROGRESS_INTERVAL: usize = 64 * 1024;

/// Observability hooks for one tokenization pass.
///
/// Hooks never change the produced rows; they exist for progress feedback
/// and cooperative cancellation.
#[derive(Default)]
pub struct TokenizeHooks<'a> {
    /// Invoked as `(processed_chars, total_chars)`.
    pub progress: Option<&'a dyn Fn(usize, usize)>,
    /// Characters between progress callbacks (0 = default interval).
    pub progress_interval: usize,
    /// Cancellation flag polled inside the scan loop.
    pub cancel: Option<&'a CancelToken>,
}

/// Rows plus the quoting problems found while producing them.
#[derive(Debug, Clone)]
pub struct TokenizeOutcome {
    /// Tokenized rows in input order, header row included.
    pub rows: Vec<Vec<String>>,
    /// Quoting problems keyed by row index.
    pub quoting_issues: Vec<QuotingIssue>,
}

/// Tokenizes delimited text into rows of string cells.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    delimiter: char,
    quote: char,
}

impl Tokenizer {
    /// Create a tokenizer for the given delimiter and quote characters.
    pub fn new(delimiter: char, quote: char) -> Self {
        Self { delimiter, quote }
    }

    /// Tokenize without hooks.
    pub fn tokenize(&self, text: &str) -> Result<TokenizeOutcome> {
        self.tokenize_with(text, TokenizeHooks::default())
    }

    /// Tokenize with progress/cancellation hooks.
    pub fn tokenize_with(&self, text: &str, hooks: TokenizeHooks<'_>) -> Result<TokenizeOutcome> {
        let total_chars = text.chars().count();
        let interval = if hooks.progress_interval == 0 {
            DEFAULT_PROGRESS_INTERVAL
        } else {
            hooks.progress_interval
        };

        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut quoting_issues: Vec<QuotingIssue> = Vec::new();
        let mut row: Vec<String> = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;
        let mut field_was_quoted = false;
        let mut processed = 0usize;
        let mut since_progress = 0usize;

        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            if let Some(cancel) = hooks.cancel {
                if cancel.is_cancelled() {
                    return Err(AssayError::Cancelled);
                }
            }
            processed += 1;
            since_progress += 1;

            if in_quotes {
                if c == self.quote {
                    match chars.peek() {
                        Some(&next) if next == self.quote => {
                            chars.next();
                            processed += 1;
                            field.push(self.quote);
                        }
                        // A quote only closes the field before a delimiter,
                        // a row terminator, or end of input. Anywhere else it
                        // is content, and the field stays open.
                        Some(&next) if next == self.delimiter => in_quotes = false,
                        Some(&'\r') | Some(&'\n') | None => in_quotes = false,
                        Some(_) => {
                            field.push(c);
                            let row_idx = rows.len();
                            if quoting_issues.last().map(|q| q.row) != Some(row_idx) {
                                quoting_issues.push(QuotingIssue {
                                    row: row_idx,
                                    kind: QuoteIssueKind::StrayQuote,
                                    issue: format!(
                                        "quote character '{}' inside a quoted field is not doubled",
                                        self.quote
                                    ),
                                });
                            }
                        }
                    }
                } else {
                    field.push(c);
                }
            } else if c == self.quote {
                if field.is_empty() && !field_was_quoted {
                    in_quotes = true;
                    field_was_quoted = true;
                } else {
                    // Quote in the middle of a field, or trailing a closed
                    // quoted field. Keep the character and flag the row.
                    field.push(c);
                    let row_idx = rows.len();
                    if quoting_issues.last().map(|q| q.row) != Some(row_idx) {
                        quoting_issues.push(QuotingIssue {
                            row: row_idx,
                            kind: QuoteIssueKind::StrayQuote,
                            issue: format!(
                                "quote character '{}' inside an unquoted field",
                                self.quote
                            ),
                        });
                    }
                }
            } else if c == self.delimiter {
                row.push(std::mem::take(&mut field));
                field_was_quoted = false;
            } else if c == '\r' || c == '\n' {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                    processed += 1;
                }
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
                field_was_quoted = false;
            } else {
                field.push(c);
            }

            if since_progress >= interval {
                since_progress = 0;
                if let Some(progress) = hooks.progress {
                    progress(processed, total_chars);
                }
            }
        }

        if in_quotes {
            // Append the partial row rather than discarding it.
            row.push(field);
            let row_idx = rows.len();
            rows.push(row);
            quoting_issues.push(QuotingIssue {
                row: row_idx,
                kind: QuoteIssueKind::UnclosedQuote,
                issue: "quoted field is not closed before end of input".to_string(),
            });
        } else if !field.is_empty() || !row.is_empty() || field_was_quoted {
            row.push(field);
            rows.push(row);
        }

        if let Some(progress) = hooks.progress {
            progress(processed, total_chars);
        }

        Ok(TokenizeOutcome {
            rows,
            quoting_issues,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn tokenize(text: &str) -> TokenizeOutcome {
        Tokenizer::new(',', '"').tokenize(text).unwrap()
    }

    #[test]
    fn test_simple_rows() {
        let out = tokenize("a,b,c\n1,2,3\n4,5,6");
        assert_eq!(
            out.rows,
            vec![
                vec!["a", "b", "c"],
                vec!["1", "2", "3"],
                vec!["4", "5", "6"],
            ]
        );
        assert!(out.quoting_issues.is_empty());
    }

    #[test]
    fn test_trailing_newline_adds_no_row() {
        let out = tokenize("a,b\n1,2\n");
        assert_eq!(out.rows.len(), 2);
    }

    #[test]
    fn test_quoted_field_with_delimiter() {
        let out = tokenize("name,notes\nAlice,\"likes a, b, and c\"");
        assert_eq!(out.rows[1], vec!["Alice", "likes a, b, and c"]);
    }

    #[test]
    fn test_escaped_quote() {
        let out = tokenize("a\n\"she said \"\"hi\"\"\"");
        assert_eq!(out.rows[1], vec!["she said \"hi\""]);
        assert!(out.quoting_issues.is_empty());
    }

    #[test]
    fn test_embedded_newline_in_quoted_field() {
        let out = tokenize("a,b\n\"line one\nline two\",x");
        assert_eq!(out.rows.len(), 2);
        assert_eq!(out.rows[1], vec!["line one\nline two", "x"]);
    }

    #[test]
    fn test_mixed_line_endings() {
        let out = tokenize("a,b\r\n1,2\r3,4\n5,6");
        assert_eq!(out.rows.len(), 4);
        assert_eq!(out.rows[2], vec!["3", "4"]);
    }

    #[test]
    fn test_unclosed_quote_appends_partial_row() {
        let out = tokenize("\"abc,\"def");
        assert_eq!(out.rows.len(), 1);
        let unclosed: Vec<_> = out
            .quoting_issues
            .iter()
            .filter(|q| q.kind == QuoteIssueKind::UnclosedQuote)
            .collect();
        assert_eq!(unclosed.len(), 1);
        assert_eq!(unclosed[0].row, 0);
    }

    #[test]
    fn test_stray_quote_flagged_once_per_row() {
        let out = tokenize("a\"b,c\"d\n1,2");
        assert_eq!(out.rows.len(), 2);
        let strays: Vec<_> = out
            .quoting_issues
            .iter()
            .filter(|q| q.kind == QuoteIssueKind::StrayQuote)
            .collect();
        assert_eq!(strays.len(), 1);
        assert_eq!(strays[0].row, 0);
    }

    #[test]
    fn test_empty_quoted_field() {
        let out = tokenize("a,\"\",c");
        assert_eq!(out.rows[0], vec!["a", "", "c"]);
    }

    #[test]
    fn test_progress_callback_fires() {
        let calls = RefCell::new(Vec::new());
        let record = |done: usize, total: usize| calls.borrow_mut().push((done, total));
        let hooks = TokenizeHooks {
            progress: Some(&record),
            progress_interval: 4,
            cancel: None,
        };
        let out = Tokenizer::new(',', '"')
            .tokenize_with("a,b\n1,2\n3,4", hooks)
            .unwrap();
        assert_eq!(out.rows.len(), 3);
        let calls = calls.into_inner();
        assert!(!calls.is_empty());
        // Final call always reports completion.
        assert_eq!(calls.last().unwrap(), &(11, 11));
    }

    #[test]
    fn test_cancellation_aborts_scan() {
        let token = CancelToken::new();
        token.cancel();
        let hooks = TokenizeHooks {
            progress: None,
            progress_interval: 0,
            cancel: Some(&token),
        };
        let result = Tokenizer::new(',', '"').tokenize_with("a,b\n1,2", hooks);
        assert!(matches!(result, Err(AssayError::Cancelled)));
    }
}
