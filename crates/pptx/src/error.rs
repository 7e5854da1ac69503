//! Error types for PPTX decoding.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding a PPTX archive.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read a part out of the archive.
    #[error("Failed to read archive part: {0}")]
    Io(#[from] std::io::Error),

    /// The archive could not be opened or walked as a ZIP.
    #[error("ZIP error: {0}")]
    Zip(String),

    /// A part of the OOXML package could not be parsed.
    #[error("XML parsing error in '{part}': {message}")]
    Xml { part: String, message: String },

    /// A required package part is absent.
    #[error("Missing archive part: {0}")]
    MissingPart(String),
}
