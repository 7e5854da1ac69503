//! Slide and deck extraction orchestration.
//!
//! One pass per document load: classify shapes, normalize and serialize
//! tables, assemble one [`SlideRecord`] per slide. Every recovery path
//! degrades to "less content extracted" rather than aborting the deck.

use crate::classify::ShapeClassifier;
use crate::config::ExtractionConfig;
use crate::error::TableError;
use crate::serialize::TableSerializer;
use crate::table::TableNormalizer;
use crate::types::{Deck, Slide, SlideRecord};

/// Extracts the content of a single slide.
#[derive(Debug, Clone, Default)]
pub struct SlideExtractor {
    config: ExtractionConfig,
    classifier: ShapeClassifier,
    normalizer: TableNormalizer,
    serializer: TableSerializer,
}

impl SlideExtractor {
    /// Create an extractor with the given thresholds.
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            config,
            classifier: ShapeClassifier::new(),
            normalizer: TableNormalizer::new(),
            serializer: TableSerializer::new(),
        }
    }

    /// Extract one slide into a [`SlideRecord`]. Never fails: tables that
    /// cannot be normalized or fall below the size thresholds are dropped
    /// (together with their serialized text) and extraction continues.
    pub fn extract(&self, slide: &Slide, slide_number: usize) -> SlideRecord {
        let classified = self.classifier.classify(slide);

        let mut tables = Vec::new();
        let mut table_texts = Vec::new();

        for grid in classified.table_grids {
            let table = match self.normalizer.normalize(grid) {
                Ok(table) => table,
                Err(TableError::Empty) => {
                    log::debug!("Slide {}: skipping empty table", slide_number);
                    continue;
                }
                Err(err) => {
                    log::warn!("Slide {}: skipping malformed table: {}", slide_number, err);
                    continue;
                }
            };

            if table.row_count() < self.config.min_table_rows
                || table.column_count() < self.config.min_table_cols
            {
                log::debug!(
                    "Slide {}: dropping {}x{} table below {}x{} threshold",
                    slide_number,
                    table.row_count(),
                    table.column_count(),
                    self.config.min_table_rows,
                    self.config.min_table_cols
                );
                continue;
            }

            // Text and table are pushed together to keep the indexes aligned.
            table_texts.push(self.serializer.to_markdown(&table));
            tables.push(table);
        }

        let has_content =
            classified.title.is_some() || !classified.text_blocks.is_empty() || !tables.is_empty();

        SlideRecord {
            slide_number,
            title: classified.title,
            text_blocks: classified.text_blocks,
            tables,
            table_texts,
            has_content,
        }
    }
}

/// Extracts every slide of a deck, in order.
#[derive(Debug, Clone, Default)]
pub struct DeckExtractor {
    slide_extractor: SlideExtractor,
}

impl DeckExtractor {
    /// Create a deck extractor with the given thresholds.
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            slide_extractor: SlideExtractor::new(config),
        }
    }

    /// Extract all slides, 1-indexed in source order.
    ///
    /// A deck with no slides yields an empty list. Callers must tolerate
    /// a result shorter than the source slide count.
    pub fn extract_all(&self, deck: &Deck) -> Vec<SlideRecord> {
        if deck.slides.is_empty() {
            log::debug!("Deck '{}' has no slides to extract", deck.filename);
            return Vec::new();
        }

        let records: Vec<SlideRecord> = deck
            .slides
            .iter()
            .enumerate()
            .map(|(idx, slide)| {
                log::debug!("Extracting content from slide {}", idx + 1);
                self.slide_extractor.extract(slide, idx + 1)
            })
            .collect();

        log::info!(
            "Extracted content from {} of {} slides in '{}'",
            records.len(),
            deck.slides.len(),
            deck.filename
        );

        records
    }
}
