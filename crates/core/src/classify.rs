//! Shape classification: partition a slide's shapes into title, plain
//! text, and tables.

use crate::types::{RawTableGrid, ShapeKind, Slide};

/// Result of classifying one slide's shapes.
///
/// Order within each bucket matches shape encounter order on the slide.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedShapes<'a> {
    /// Trimmed title text, if the slide's title shape holds non-empty text.
    pub title: Option<String>,

    /// Joined text of each non-title, non-table text shape.
    pub text_blocks: Vec<String>,

    /// Raw cell grids of each table shape.
    pub table_grids: Vec<&'a RawTableGrid>,
}

/// Partitions a slide's shapes into {title, text, table} buckets.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeClassifier;

impl ShapeClassifier {
    /// Create a new classifier.
    pub fn new() -> Self {
        Self
    }

    /// Classify every shape on the slide.
    ///
    /// The title shape is excluded from the text and table buckets even if
    /// it also carries a table. Text shapes with only whitespace are
    /// dropped. Pure function of the slide.
    pub fn classify<'a>(&self, slide: &'a Slide) -> ClassifiedShapes<'a> {
        let mut result = ClassifiedShapes::default();

        for (index, shape) in slide.shapes.iter().enumerate() {
            let is_title = slide.title_index == Some(index);

            if is_title {
                if let Some(text) = shape_text(&shape.kind) {
                    if !text.is_empty() {
                        result.title = Some(text);
                    }
                }
                continue;
            }

            match &shape.kind {
                ShapeKind::Table { grid } => result.table_grids.push(grid),
                ShapeKind::TextFrame { paragraphs } => {
                    let text = join_paragraphs(paragraphs);
                    if !text.is_empty() {
                        result.text_blocks.push(text);
                    }
                }
                ShapeKind::Other => {}
            }
        }

        result
    }
}

/// Extract the text of a shape, if it has any.
///
/// Table shapes have no title-style text; their content lives in the grid.
fn shape_text(kind: &ShapeKind) -> Option<String> {
    match kind {
        ShapeKind::TextFrame { paragraphs } => Some(join_paragraphs(paragraphs)),
        ShapeKind::Table { .. } | ShapeKind::Other => None,
    }
}

/// Join a text frame's paragraphs: trim each, drop empties, single `\n`
/// between the survivors.
fn join_paragraphs(paragraphs: &[String]) -> String {
    paragraphs
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Shape;

    fn text_shape(paragraphs: &[&str]) -> Shape {
        Shape::text_frame(paragraphs.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_title_is_trimmed_and_excluded_from_text() {
        let mut slide = Slide::new();
        let idx = slide.add_shape(text_shape(&["  Q3 Results  "]));
        slide.add_shape(text_shape(&["Body text"]));
        slide.title_index = Some(idx);

        let result = ShapeClassifier::new().classify(&slide);
        assert_eq!(result.title.as_deref(), Some("Q3 Results"));
        assert_eq!(result.text_blocks, vec!["Body text".to_string()]);
    }

    #[test]
    fn test_whitespace_title_is_absent() {
        let mut slide = Slide::new();
        let idx = slide.add_shape(text_shape(&["   ", ""]));
        slide.title_index = Some(idx);

        let result = ShapeClassifier::new().classify(&slide);
        assert!(result.title.is_none());
    }

    #[test]
    fn test_tables_routed_separately_from_text() {
        let mut slide = Slide::new();
        slide.add_shape(Shape::table(vec![vec!["a".into(), "b".into()]]));
        slide.add_shape(text_shape(&["note"]));
        slide.add_shape(Shape::other());

        let result = ShapeClassifier::new().classify(&slide);
        assert_eq!(result.table_grids.len(), 1);
        assert_eq!(result.text_blocks, vec!["note".to_string()]);
        assert!(result.title.is_none());
    }

    #[test]
    fn test_paragraph_joining_drops_empty_paragraphs() {
        let mut slide = Slide::new();
        slide.add_shape(text_shape(&["First line ", "", "  ", "Second line"]));

        let result = ShapeClassifier::new().classify(&slide);
        assert_eq!(result.text_blocks, vec!["First line\nSecond line".to_string()]);
    }

    #[test]
    fn test_title_shape_with_table_kind_is_not_a_table() {
        // A title reference pointing at a table shape yields no title text
        // and keeps the shape out of the table bucket.
        let mut slide = Slide::new();
        let idx = slide.add_shape(Shape::table(vec![vec!["x".into()]]));
        slide.title_index = Some(idx);

        let result = ShapeClassifier::new().classify(&slide);
        assert!(result.title.is_none());
        assert!(result.table_grids.is_empty());
    }

    #[test]
    fn test_encounter_order_preserved() {
        let mut slide = Slide::new();
        slide.add_shape(text_shape(&["one"]));
        slide.add_shape(text_shape(&["two"]));
        slide.add_shape(text_shape(&["three"]));

        let result = ShapeClassifier::new().classify(&slide);
        assert_eq!(
            result.text_blocks,
            vec!["one".to_string(), "two".to_string(), "three".to_string()]
        );
    }
}
