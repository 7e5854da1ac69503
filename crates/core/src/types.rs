//! Domain types for slide-deck content extraction.

use serde::{Deserialize, Serialize};

/// A decoded presentation: an ordered sequence of slides.
///
/// Produced by an upstream decoder (e.g. the `decksum-pptx` crate) and
/// consumed read-only by the extraction pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Deck {
    /// Original filename (without path).
    pub filename: String,

    /// Slides in presentation order.
    pub slides: Vec<Slide>,
}

impl Deck {
    /// Create a new deck with the given filename and no slides.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            slides: Vec::new(),
        }
    }

    /// Add a slide to the deck.
    pub fn add_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }
}

/// One slide: an ordered container of shapes plus an optional reference
/// to the shape that holds the slide title.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Slide {
    /// Shapes in source (z/creation) order.
    pub shapes: Vec<Shape>,

    /// Index into `shapes` of the designated title shape, if any.
    pub title_index: Option<usize>,
}

impl Slide {
    /// Create an empty slide.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape and return its index.
    pub fn add_shape(&mut self, shape: Shape) -> usize {
        self.shapes.push(shape);
        self.shapes.len() - 1
    }
}

/// A positioned visual element on a slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    /// What kind of content the shape carries.
    pub kind: ShapeKind,
}

impl Shape {
    /// Create a text-frame shape from its paragraphs.
    pub fn text_frame(paragraphs: Vec<String>) -> Self {
        Self {
            kind: ShapeKind::TextFrame { paragraphs },
        }
    }

    /// Create a table shape from its raw cell grid.
    pub fn table(grid: RawTableGrid) -> Self {
        Self {
            kind: ShapeKind::Table { grid },
        }
    }

    /// Create a shape with no extractable content (picture, chart, ...).
    pub fn other() -> Self {
        Self {
            kind: ShapeKind::Other,
        }
    }
}

/// Closed set of shape kinds the extraction pipeline understands.
///
/// The decoder classifies each source shape exactly once; the core
/// pattern-matches on this enum instead of probing attributes at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ShapeKind {
    /// A shape with a text frame, one entry per paragraph, in reading order.
    TextFrame { paragraphs: Vec<String> },

    /// A table shape with its raw cell grid.
    Table { grid: RawTableGrid },

    /// Anything without extractable text or table content.
    Other,
}

/// Unprocessed table data: rows of trimmed cell-text strings, exactly as
/// read from the source shape. Consumed by the normalizer and discarded.
pub type RawTableGrid = Vec<Vec<String>>;

/// A table after header inference: named columns and rectangular rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTable {
    /// Ordered column labels. Either the inferred header row's cells, or
    /// positional labels ("0", "1", ...) when no header was found.
    /// Duplicates from the source are passed through untouched.
    pub columns: Vec<String>,

    /// Ordered data rows; every row has exactly `columns.len()` cells.
    pub rows: Vec<Vec<String>>,
}

impl NormalizedTable {
    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Extracted content of one slide, immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideRecord {
    /// 1-based slide number, matching source order.
    pub slide_number: usize,

    /// Slide title, present only if a non-empty title shape was found.
    pub title: Option<String>,

    /// Non-title, non-table text blocks in shape encounter order.
    pub text_blocks: Vec<String>,

    /// Tables that passed normalization and the size filter.
    pub tables: Vec<NormalizedTable>,

    /// Serialized form of each table, index-aligned with `tables`.
    pub table_texts: Vec<String>,

    /// True iff the slide yielded a title, text, or at least one table.
    pub has_content: bool,
}

impl SlideRecord {
    /// Create an empty record for the given slide number
    /// (`has_content == false`).
    pub fn empty(slide_number: usize) -> Self {
        Self {
            slide_number,
            title: None,
            text_blocks: Vec::new(),
            tables: Vec::new(),
            table_texts: Vec::new(),
            has_content: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_has_no_content() {
        let record = SlideRecord::empty(3);
        assert_eq!(record.slide_number, 3);
        assert!(record.title.is_none());
        assert!(record.text_blocks.is_empty());
        assert!(record.tables.is_empty());
        assert!(record.table_texts.is_empty());
        assert!(!record.has_content);
    }

    #[test]
    fn test_add_shape_returns_index() {
        let mut slide = Slide::new();
        assert_eq!(slide.add_shape(Shape::other()), 0);
        assert_eq!(slide.add_shape(Shape::text_frame(vec!["hi".into()])), 1);
    }
}
