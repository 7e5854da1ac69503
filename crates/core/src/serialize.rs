//! Deterministic text rendering of normalized tables.
//!
//! The markdown form is what gets handed to the summarization client, so
//! identical input must always produce identical output. Cell values are
//! written verbatim; a literal `|` inside a cell will corrupt the rendered
//! markdown structure. That matches the source system's behavior and is
//! deliberately left unescaped here.

use crate::types::NormalizedTable;

/// Renders a [`NormalizedTable`] as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableSerializer;

impl TableSerializer {
    /// Create a new serializer.
    pub fn new() -> Self {
        Self
    }

    /// Render as a markdown pipe table: header row, dash separator, one
    /// line per data row.
    pub fn to_markdown(&self, table: &NormalizedTable) -> String {
        let mut out = String::new();

        out.push_str(&markdown_row(&table.columns));
        out.push('\n');

        let separator: Vec<String> = table.columns.iter().map(|_| "---".to_string()).collect();
        out.push_str(&markdown_row(&separator));

        for row in &table.rows {
            out.push('\n');
            out.push_str(&markdown_row(row));
        }

        out
    }

    /// Render as a fixed-width plain-text table: columns left-aligned,
    /// single space padding, no borders.
    pub fn to_plain_text(&self, table: &NormalizedTable) -> String {
        let widths = column_widths(table);

        let mut lines = Vec::with_capacity(table.rows.len() + 1);
        lines.push(padded_row(&table.columns, &widths));
        for row in &table.rows {
            lines.push(padded_row(row, &widths));
        }

        lines.join("\n")
    }
}

fn markdown_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

/// Width of each column: the longest cell in it, header included.
fn column_widths(table: &NormalizedTable) -> Vec<usize> {
    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();

    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            if len > widths[i] {
                widths[i] = len;
            }
        }
    }

    widths
}

fn padded_row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();

    padded.join(" ").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> NormalizedTable {
        NormalizedTable {
            columns: vec!["Segment".into(), "Rate (%)".into()],
            rows: vec![
                vec!["Commercial".into(), "2.5".into()],
                vec!["Retail".into(), "3.1".into()],
            ],
        }
    }

    #[test]
    fn test_markdown_layout() {
        let text = TableSerializer::new().to_markdown(&sample_table());
        assert_eq!(
            text,
            "| Segment | Rate (%) |\n\
             | --- | --- |\n\
             | Commercial | 2.5 |\n\
             | Retail | 3.1 |"
        );
    }

    #[test]
    fn test_markdown_is_deterministic() {
        let serializer = TableSerializer::new();
        let table = sample_table();
        assert_eq!(serializer.to_markdown(&table), serializer.to_markdown(&table));
    }

    #[test]
    fn test_markdown_headerless_table_uses_positional_labels() {
        let table = NormalizedTable {
            columns: vec!["0".into(), "1".into()],
            rows: vec![vec!["1".into(), "2".into()]],
        };
        let text = TableSerializer::new().to_markdown(&table);
        assert!(text.starts_with("| 0 | 1 |\n| --- | --- |"));
    }

    #[test]
    fn test_plain_text_alignment() {
        let text = TableSerializer::new().to_plain_text(&sample_table());
        assert_eq!(
            text,
            "Segment    Rate (%)\n\
             Commercial 2.5\n\
             Retail     3.1"
        );
    }

    #[test]
    fn test_plain_text_no_trailing_spaces() {
        let text = TableSerializer::new().to_plain_text(&sample_table());
        for line in text.lines() {
            assert_eq!(line, line.trim_end());
        }
    }

    #[test]
    fn test_pipe_in_cell_is_written_verbatim() {
        let table = NormalizedTable {
            columns: vec!["A".into(), "B".into()],
            rows: vec![vec!["x|y".into(), "z".into()]],
        };
        let text = TableSerializer::new().to_markdown(&table);
        assert!(text.contains("| x|y | z |"));
    }
}
