//! Extraction configuration.
//!
//! Constructed once at startup and passed by reference into the extractors;
//! nothing in the pipeline mutates it.

use serde::{Deserialize, Serialize};

/// Thresholds controlling which extracted tables are kept.
///
/// A table is kept only if it has at least `min_table_rows` data rows and
/// `min_table_cols` columns after normalization. Values of 0 or 1
/// effectively disable the corresponding check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Minimum number of data rows for a table to be kept.
    pub min_table_rows: usize,

    /// Minimum number of columns for a table to be kept.
    pub min_table_cols: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_table_rows: 2,
            min_table_cols: 2,
        }
    }
}

impl ExtractionConfig {
    /// Create a configuration with the default thresholds (2 rows, 2 cols).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum row threshold.
    pub fn with_min_table_rows(mut self, rows: usize) -> Self {
        self.min_table_rows = rows;
        self
    }

    /// Set the minimum column threshold.
    pub fn with_min_table_cols(mut self, cols: usize) -> Self {
        self.min_table_cols = cols;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExtractionConfig::default();
        assert_eq!(config.min_table_rows, 2);
        assert_eq!(config.min_table_cols, 2);
    }

    #[test]
    fn test_builder() {
        let config = ExtractionConfig::new()
            .with_min_table_rows(3)
            .with_min_table_cols(1);
        assert_eq!(config.min_table_rows, 3);
        assert_eq!(config.min_table_cols, 1);
    }
}
