// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Table renderer for CLI list views.

use std::io::Write;

use crate::color;

/// How a cell's text is styled after padding.
pub enum CellStyle {
    Plain,
    /// Apply [`color::apply_muted()`].
    Muted,
    /// Apply [`color::apply_status()`]: green, yellow or red by run status.
    Status,
}

/// A column definition in a [`Table`].
pub struct Column {
    pub name: &'static str,
    pub style: CellStyle,
    /// Maximum width in characters (`None` = unlimited)
    pub max_width: Option<usize>,
}

impl Column {
    pub fn left(name: &'static str) -> Self {
        Self {
            name,
            style: CellStyle::Plain,
            max_width: None,
        }
    }

    pub fn muted(name: &'static str) -> Self {
        Self {
            style: CellStyle::Muted,
            ..Self::left(name)
        }
    }

    pub fn status(name: &'static str) -> Self {
        Self {
            style: CellStyle::Status,
            ..Self::left(name)
        }
    }

    /// Set maximum width (values exceeding this are truncated).
    pub fn with_max(mut self, max: usize) -> Self {
        self.max_width = Some(max);
        self
    }
}

/// A left-aligned tabular renderer that sizes columns from its data.
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
    colorize: bool,
}

/// Column separator: double space.
const SEP: &str = "  ";

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            colorize: color::should_colorize(),
        }
    }

    /// Create a table that never emits color codes.
    #[cfg(test)]
    pub fn plain(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            colorize: false,
        }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    /// Render header and rows. Nothing is written for an empty table.
    ///
    /// The last column is never padded. Color is applied after padding so
    /// escapes don't corrupt widths.
    pub fn render(&self, out: &mut impl Write) -> std::io::Result<()> {
        if self.rows.is_empty() {
            return Ok(());
        }
        let widths = self.compute_widths();
        let last = self.columns.len().saturating_sub(1);

        let header: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let cell = if i == last {
                    col.name.to_string()
                } else {
                    pad(col.name, widths[i])
                };
                if self.colorize {
                    color::apply_header(&cell)
                } else {
                    cell
                }
            })
            .collect();
        writeln!(out, "{}", header.join(SEP))?;

        for row in &self.rows {
            let cells: Vec<String> = self
                .columns
                .iter()
                .enumerate()
                .map(|(i, col)| {
                    let raw = row.get(i).map(String::as_str).unwrap_or("");
                    let text = truncate(raw, col.max_width);
                    let cell = if i == last {
                        text.to_string()
                    } else {
                        pad(text, widths[i])
                    };
                    stylize(&cell, &col.style, self.colorize)
                })
                .collect();
            writeln!(out, "{}", cells.join(SEP))?;
        }
        Ok(())
    }

    fn compute_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let data = self
                    .rows
                    .iter()
                    .map(|row| {
                        let raw = row.get(i).map(String::as_str).unwrap_or("");
                        truncate(raw, col.max_width).chars().count()
                    })
                    .max()
                    .unwrap_or(0);
                col.name.len().max(data)
            })
            .collect()
    }
}

fn pad(text: &str, width: usize) -> String {
    format!("{:<width$}", text)
}

/// Truncate to at most `max` characters, on a char boundary.
fn truncate(s: &str, max: Option<usize>) -> &str {
    match max.and_then(|m| s.char_indices().nth(m)) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn stylize(text: &str, style: &CellStyle, colorize: bool) -> String {
    if !colorize {
        return text.to_string();
    }
    match style {
        CellStyle::Plain => text.to_string(),
        CellStyle::Muted => color::apply_muted(text),
        CellStyle::Status => color::apply_status(text),
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
