//! Plain-text tables for terminal output.
//!
//! A `Table` is only strings: column headers plus rows of cells. Rendering
//! draws a boxed grid with a rule between every row.

use std::fmt;
use unicode_width::UnicodeWidthStr;

use crate::domain::BookFields;

/// Rows and column names ready for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All cells of one column, top to bottom.
    pub fn column_values(&self, name: &str) -> Vec<&str> {
        match self.column_index(name) {
            Some(idx) => self
                .rows
                .iter()
                .map(|row| row.get(idx).map(String::as_str).unwrap_or(""))
                .collect(),
            None => Vec::new(),
        }
    }

    /// A one-row table describing a single book.
    pub fn from_fields(fields: &BookFields) -> Self {
        let columns = ["Title", "Description", "Status", "Percentage read", "Start Date", "End Date"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        let mut table = Self::new(columns);
        table.push_row(vec![
            fields.title.clone(),
            fields.description.clone().unwrap_or_default(),
            fields.status.to_string(),
            fields.pct_read.to_string(),
            fields.start_read_date.map(|d| d.to_string()).unwrap_or_default(),
            fields.end_read_date.map(|d| d.to_string()).unwrap_or_default(),
        ]);
        table
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.width()).collect();
        for row in &self.rows {
            for (idx, cell) in row.iter().enumerate() {
                let len = cell.width();
                match widths.get_mut(idx) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }
        widths
    }
}

fn rule(f: &mut fmt::Formatter<'_>, widths: &[usize], left: char, fill: char, mid: char, right: char) -> fmt::Result {
    write!(f, "{left}")?;
    for (idx, width) in widths.iter().enumerate() {
        if idx > 0 {
            write!(f, "{mid}")?;
        }
        write!(f, "{}", fill.to_string().repeat(width + 2))?;
    }
    writeln!(f, "{right}")
}

fn cells(f: &mut fmt::Formatter<'_>, widths: &[usize], row: &[String]) -> fmt::Result {
    write!(f, "│")?;
    for (idx, &width) in widths.iter().enumerate() {
        let cell = row.get(idx).map(String::as_str).unwrap_or("");
        let pad = width.saturating_sub(cell.width());
        write!(f, " {cell}{:pad$} │", "")?;
    }
    writeln!(f)
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        rule(f, &widths, '╒', '═', '╤', '╕')?;
        cells(f, &widths, &self.columns)?;
        rule(f, &widths, '╞', '═', '╪', '╡')?;
        for (idx, row) in self.rows.iter().enumerate() {
            if idx > 0 {
                rule(f, &widths, '├', '─', '┼', '┤')?;
            }
            cells(f, &widths, row)?;
        }
        rule(f, &widths, '╘', '═', '╧', '╛')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewBook;

    fn sample() -> Table {
        let mut table = Table::new(vec!["id".into(), "title".into()]);
        table.push_row(vec!["1".into(), "Dune".into()]);
        table.push_row(vec!["2".into(), "Foundation".into()]);
        table
    }

    #[test]
    fn test_render_grid() {
        let rendered = sample().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "╒════╤════════════╕");
        assert_eq!(lines[1], "│ id │ title      │");
        assert_eq!(lines[2], "╞════╪════════════╡");
        assert_eq!(lines[3], "│ 1  │ Dune       │");
        assert_eq!(lines[4], "├────┼────────────┤");
        assert_eq!(lines[5], "│ 2  │ Foundation │");
        assert_eq!(lines[6], "╘════╧════════════╛");
    }

    #[test]
    fn test_render_aligns_wide_glyphs() {
        let mut table = Table::new(vec!["title".into()]);
        table.push_row(vec!["三体".into()]);
        table.push_row(vec!["Émile".into()]);

        let rendered = table.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "╒═══════╕");
        assert_eq!(lines[3], "│ 三体  │");
        assert_eq!(lines[5], "│ Émile │");
    }

    #[test]
    fn test_render_empty_table_has_header_only() {
        let table = Table::new(vec!["id".into()]);
        assert!(table.is_empty());
        assert_eq!(table.to_string().lines().count(), 4);
    }

    #[test]
    fn test_column_values() {
        let table = sample();
        assert_eq!(table.column_values("title"), vec!["Dune", "Foundation"]);
        assert!(table.column_values("missing").is_empty());
    }

    #[test]
    fn test_from_fields_blank_for_absent() {
        let fields = NewBook::new("Dune").into_fields();
        let table = Table::from_fields(&fields);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0], vec!["Dune", "", "pending", "0", "", ""]);
    }
}
