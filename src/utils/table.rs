//! Table rendering utilities for CLI outputs.

use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub width: usize,
}

impl Column {
    pub fn new(header: &str) -> Self {
        Self {
            header: header.to_string(),
            width: header.width(),
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Add a row, widening columns to fit. Missing cells render empty.
    pub fn add_row(&mut self, row: Vec<String>) {
        for (col, cell) in self.columns.iter_mut().zip(row.iter()) {
            col.width = col.width.max(cell.width());
        }
        self.rows.push(row);
    }

    pub fn render(&self, separator: &str) -> String {
        let mut out = String::new();

        let header: Vec<String> = self
            .columns
            .iter()
            .map(|c| pad(&c.header, c.width))
            .collect();
        out.push_str(header.join(" ").trim_end());
        out.push('\n');

        let total: usize =
            self.columns.iter().map(|c| c.width).sum::<usize>() + self.columns.len().saturating_sub(1);
        let sep = if separator.is_empty() { "-" } else { separator };
        out.push_str(&sep.repeat(total / sep.width().max(1)));
        out.push('\n');

        for row in &self.rows {
            let cells: Vec<String> = self
                .columns
                .iter()
                .enumerate()
                .map(|(i, c)| pad(row.get(i).map(String::as_str).unwrap_or(""), c.width))
                .collect();
            out.push_str(cells.join(" ").trim_end());
            out.push('\n');
        }

        out
    }
}

/// Left-align by display width, so emoji and accented text line up.
fn pad(s: &str, width: usize) -> String {
    let w = s.width();
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_grow_to_fit() {
        let mut t = Table::new(vec![Column::new("ID"), Column::new("Title")]);
        t.add_row(vec!["12".into(), "Write report".into()]);
        t.add_row(vec!["3".into()]);

        let out = t.render("-");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "ID Title");
        assert_eq!(lines[1], "-".repeat(15));
        assert_eq!(lines[2], "12 Write report");
        assert_eq!(lines[3], "3");
    }
}
