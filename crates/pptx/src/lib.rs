//! PPTX (Office Open XML) decoding into the shape-tree model consumed by
//! `decksum-core`.

pub mod error;
pub mod parser;

pub use error::{Error, Result};
pub use parser::PptxParser;
