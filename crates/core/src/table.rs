//! Table normalization: header inference over raw cell grids.
//!
//! Financial decks mix label rows ("Segment", "Rate (%)") with purely
//! numeric rows. The first row is treated as a header only when the grid
//! has more than one row and at least one first-row cell is not numeric;
//! otherwise every row is data and positional column labels are
//! synthesized.

use crate::error::TableError;
use crate::types::{NormalizedTable, RawTableGrid};

/// Converts raw cell grids into [`NormalizedTable`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableNormalizer;

impl TableNormalizer {
    /// Create a new normalizer.
    pub fn new() -> Self {
        Self
    }

    /// Normalize a raw grid.
    ///
    /// Fails with [`TableError::Empty`] when the grid has no rows and with
    /// [`TableError::Ragged`] when rows differ in length. Callers are
    /// expected to skip the offending table and continue.
    pub fn normalize(&self, grid: &RawTableGrid) -> Result<NormalizedTable, TableError> {
        let Some(first) = grid.first() else {
            return Err(TableError::Empty);
        };

        let width = first.len();
        for (row_index, row) in grid.iter().enumerate() {
            if row.len() != width {
                return Err(TableError::Ragged {
                    row: row_index,
                    found: row.len(),
                    expected: width,
                });
            }
        }

        let has_header = grid.len() > 1 && first.iter().any(|cell| !is_numeric(cell));

        let table = if has_header {
            NormalizedTable {
                columns: first.clone(),
                rows: grid[1..].to_vec(),
            }
        } else {
            NormalizedTable {
                columns: (0..width).map(|i| i.to_string()).collect(),
                rows: grid.clone(),
            }
        };

        Ok(table)
    }
}

/// Check whether a cell value reads as a number.
///
/// Thousands separators, a currency symbol, a trailing percent sign, and
/// surrounding whitespace are stripped before parsing as `f64`. An empty
/// string after stripping is not numeric.
pub fn is_numeric(value: &str) -> bool {
    let cleaned = value
        .replace(',', "")
        .replace('$', "")
        .replace('%', "");
    let cleaned = cleaned.trim();

    !cleaned.is_empty() && cleaned.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> RawTableGrid {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_numeric_detection() {
        assert!(is_numeric("1,234.56"));
        assert!(is_numeric("$100"));
        assert!(is_numeric("25%"));
        assert!(is_numeric("-2"));
        assert!(is_numeric(" 3.5 "));
        assert!(is_numeric("1e3"));

        assert!(!is_numeric("Commercial"));
        assert!(!is_numeric(""));
        assert!(!is_numeric("N/A"));
        assert!(!is_numeric("$"));
        assert!(!is_numeric("  "));
    }

    #[test]
    fn test_header_inferred_from_non_numeric_first_row() {
        let raw = grid(&[
            &["Segment", "Rate (%)"],
            &["Commercial", "2.5"],
            &["Retail", "3.1"],
        ]);
        let table = TableNormalizer::new().normalize(&raw).unwrap();

        assert_eq!(table.columns, vec!["Segment", "Rate (%)"]);
        assert_eq!(table.rows.len(), raw.len() - 1);
        assert_eq!(table.rows[0], vec!["Commercial", "2.5"]);
        assert_eq!(table.rows[1], vec!["Retail", "3.1"]);
    }

    #[test]
    fn test_all_numeric_first_row_gets_positional_columns() {
        let raw = grid(&[&["1", "2"], &["3", "4"]]);
        let table = TableNormalizer::new().normalize(&raw).unwrap();

        assert_eq!(table.columns, vec!["0", "1"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["1", "2"]);
    }

    #[test]
    fn test_single_row_grid_is_all_data() {
        // One row never becomes a header, even when non-numeric.
        let raw = grid(&[&["A", "B"]]);
        let table = TableNormalizer::new().normalize(&raw).unwrap();

        assert_eq!(table.columns, vec!["0", "1"]);
        assert_eq!(table.rows, vec![vec!["A", "B"]]);
    }

    #[test]
    fn test_mixed_first_row_counts_as_header() {
        let raw = grid(&[&["2023", "Default Rate"], &["1", "2.5%"]]);
        let table = TableNormalizer::new().normalize(&raw).unwrap();

        assert_eq!(table.columns, vec!["2023", "Default Rate"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn test_empty_grid_fails() {
        let raw: RawTableGrid = Vec::new();
        assert_eq!(
            TableNormalizer::new().normalize(&raw),
            Err(TableError::Empty)
        );
    }

    #[test]
    fn test_ragged_grid_fails() {
        let raw = grid(&[&["a", "b"], &["c"]]);
        assert_eq!(
            TableNormalizer::new().normalize(&raw),
            Err(TableError::Ragged {
                row: 1,
                found: 1,
                expected: 2
            })
        );
    }

    #[test]
    fn test_normalize_is_stateless() {
        let raw = grid(&[&["Name", "Value"], &["x", "1"]]);
        let normalizer = TableNormalizer::new();
        assert_eq!(
            normalizer.normalize(&raw).unwrap(),
            normalizer.normalize(&raw).unwrap()
        );
    }

    #[test]
    fn test_duplicate_header_labels_pass_through() {
        let raw = grid(&[&["Rate", "Rate"], &["1", "2"], &["3", "4"]]);
        let table = TableNormalizer::new().normalize(&raw).unwrap();
        assert_eq!(table.columns, vec!["Rate", "Rate"]);
    }
}
