//! QTI Extractor - Split QTI question banks into smaller files by title.
//!
//! This crate reads a QTI XML assessment file, selects the items (or whole
//! sections) whose `title` contains a pattern, and writes each group of
//! matches to its own well-formed QTI document.
//!
//! # Example
//!
//! ```
//! use qti_extractor::{derive_filename, group_key, matches};
//!
//! let title = "DCIT 408 Networking Basics";
//! assert!(matches("dcit 408", title));
//! assert_eq!(group_key(title, 2), "DCIT 408");
//! assert_eq!(derive_filename("DCIT 408", "Questions_"), "Questions_DCIT_408.xml");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Namespace, element names and naming constants
//! - [`types`]: Extraction modes, reports and listings
//! - [`error`]: Error types and Result alias
//! - [`matcher`]: Case-insensitive title matching
//! - [`grouping`]: Title-prefix group keys
//! - [`filename`]: Output filename derivation
//! - [`xml`]: Parsing, owned element copies and serialization
//! - [`builder`]: Output document construction
//! - [`extractor`]: The extraction pipeline
//! - [`lister`]: Title listing
//! - [`cli`]: Command-line interface

pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod filename;
pub mod grouping;
pub mod lister;
pub mod matcher;
pub mod types;
pub mod xml;

// Re-export main functions
pub use extractor::extract;
pub use lister::list_titles;

// Re-export commonly used items
pub use error::{ExtractorError, Result};
pub use filename::derive_filename;
pub use grouping::group_key;
pub use matcher::matches;
pub use types::{ExtractionMode, ExtractionOutcome, ExtractionReport, Listing, WrittenFile};
