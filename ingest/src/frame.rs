//! FILENAME: ingest/src/frame.rs
//! PURPOSE: The raw tabular intermediate between file parsing and the model.
//! CONTEXT: A `RawFrame` is just headers plus string rows — no typing has
//! happened yet. Ragged rows are squared off at construction so every later
//! access is by plain index.

use serde::{Deserialize, Serialize};

/// An untyped table as read from a file: one header row, zero or more data
/// rows, every row exactly as wide as the header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFrame {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawFrame {
    /// Builds a frame, padding short rows with empty cells and truncating
    /// long ones to the header width.
    pub fn new(headers: Vec<String>, mut rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        for row in &mut rows {
            row.resize(width, String::new());
        }
        RawFrame { headers, rows }
    }

    /// A frame with no headers or no data rows carries nothing to ingest.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() || self.rows.is_empty()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// One cell as a raw string; out-of-range access reads as empty.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map_or("", |s| s.as_str())
    }

    /// Strips surrounding whitespace from every header name.
    pub fn trim_headers(&mut self) {
        for header in &mut self.headers {
            let trimmed = header.trim();
            if trimmed.len() != header.len() {
                *header = trimmed.to_string();
            }
        }
    }

    /// Removes one column from the header and every row. Out-of-range
    /// indices are ignored.
    pub fn drop_column(&mut self, col: usize) {
        if col >= self.headers.len() {
            return;
        }
        self.headers.remove(col);
        for row in &mut self.rows {
            if col < row.len() {
                row.remove(col);
            }
        }
    }
}
