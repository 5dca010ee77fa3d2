//! Tokenized table representation.

/// Headers plus data rows produced by the tokenizer.
///
/// Rows are kept exactly as tokenized; short or long rows are reported by
/// the structural validator rather than silently padded or truncated.
#[derive(Debug, Clone)]
pub struct Table {
    /// Column headers (generated names when the input has no header row).
    pub headers: Vec<String>,
    /// Data rows in input order, header row excluded.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table from headers and rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Generate positional column names for headerless input.
    pub fn generated_headers(width: usize) -> Vec<String> {
        (0..width).map(|i| format!("column_{}", i + 1)).collect()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// All values for a column by index; short rows yield empty strings.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|s| s.as_str()).unwrap_or(""))
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table() -> Table {
        Table::new(
            vec!["name".to_string(), "age".to_string()],
            vec![
                vec!["Alice".to_string(), "30".to_string()],
                vec!["Bob".to_string()],
            ],
        )
    }

    #[test]
    fn test_dimensions() {
        let table = make_table();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_column_values_pads_short_rows() {
        let table = make_table();
        let ages: Vec<&str> = table.column_values(1).collect();
        assert_eq!(ages, vec!["30", ""]);
    }

    #[test]
    fn test_generated_headers() {
        assert_eq!(
            Table::generated_headers(3),
            vec!["column_1", "column_2", "column_3"]
        );
    }

    #[test]
    fn test_get() {
        let table = make_table();
        assert_eq!(table.get(0, 0), Some("Alice"));
        assert_eq!(table.get(1, 1), None);
    }
}
