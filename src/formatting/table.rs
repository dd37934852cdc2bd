// src/formatting/table.rs
//! Markdown table assembly.
//!
//! Every header and cell passes through `escape_cell`, so callers hand in
//! raw display text.

use super::sanitize::escape_cell;
use std::fmt::Write;

/// A Markdown table: fixed header row plus any number of data rows.
#[derive(Debug, Clone)]
pub struct MarkdownTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl MarkdownTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row; short rows are padded and long rows truncated to the
    /// header width.
    pub fn push_row(&mut self, mut cells: Vec<String>) {
        cells.resize(self.headers.len(), String::new());
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders header, separator and rows, one line each.
    pub fn render(&self, output: &mut String) -> std::fmt::Result {
        Self::render_line(output, &self.headers)?;

        let separator = vec!["---".to_string(); self.headers.len()];
        writeln!(output, "| {} |", separator.join(" | "))?;

        for row in &self.rows {
            Self::render_line(output, row)?;
        }
        Ok(())
    }

    fn render_line(output: &mut String, cells: &[String]) -> std::fmt::Result {
        let escaped: Vec<String> = cells.iter().map(|cell| escape_cell(cell)).collect();
        writeln!(output, "| {} |", escaped.join(" | "))
    }
}
