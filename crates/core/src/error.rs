//! Error types for slide-deck content extraction.

use thiserror::Error;

/// Reasons a raw table grid cannot be normalized.
///
/// The slide extractor treats `Empty` as a silent skip and `Ragged` as a
/// logged skip; neither aborts the slide.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TableError {
    /// The grid has no rows.
    #[error("table has no rows")]
    Empty,

    /// The grid is not rectangular.
    #[error("ragged table: row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        found: usize,
        expected: usize,
    },
}
