//! Error types for the extractor.
//!
//! A pattern that matches nothing is not an error; it is reported through
//! [`crate::types::ExtractionOutcome::NoMatch`].

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the extractor library.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// Input path does not reference an existing file.
    #[error("Input file '{}' does not exist", .0.display())]
    MissingFile(PathBuf),

    /// Input is not well-formed XML.
    #[error("Error parsing XML file '{}': {source}", .path.display())]
    XmlParse {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    /// Serializing an output document failed.
    #[error("Failed to write XML to '{}': {message}", .path.display())]
    XmlWrite { path: PathBuf, message: String },

    /// A required command-line argument was not given.
    #[error("Please provide {0}")]
    MissingArgument(&'static str),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractorError>;
