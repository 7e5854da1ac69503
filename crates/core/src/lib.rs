//! Core domain types, shape classification, table normalization, and
//! extraction orchestration for slide-deck content extraction.

pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod serialize;
pub mod table;
pub mod types;

pub use classify::{ClassifiedShapes, ShapeClassifier};
pub use config::ExtractionConfig;
pub use error::TableError;
pub use extract::{DeckExtractor, SlideExtractor};
pub use serialize::TableSerializer;
pub use table::TableNormalizer;
pub use types::{Deck, NormalizedTable, RawTableGrid, Shape, ShapeKind, Slide, SlideRecord};
