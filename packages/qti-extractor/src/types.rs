//! Core data types for extraction runs and listings.

use std::fmt;
use std::path::PathBuf;

use crate::config::{
    FLAT_WORD_COUNT, ITEMS_PREFIX, QUESTIONS_PREFIX, SECTION_PREFIX, SECTION_WORD_COUNT,
};

/// How matched content is grouped and wrapped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractionMode {
    /// Match `item` elements anywhere, group by the first two title words
    /// and write each group as a bare object bank.
    #[default]
    Flat,

    /// Match `section` elements and write one assessment per section. When
    /// no section matches, items are matched directly and grouped by the
    /// first three title words.
    SectionAware,
}

impl ExtractionMode {
    /// Number of title words forming a group key in this mode.
    pub fn word_count(self) -> usize {
        match self {
            Self::Flat => FLAT_WORD_COUNT,
            Self::SectionAware => SECTION_WORD_COUNT,
        }
    }

    /// Filename prefix for item groups in this mode.
    pub fn group_prefix(self) -> &'static str {
        match self {
            Self::Flat => QUESTIONS_PREFIX,
            Self::SectionAware => ITEMS_PREFIX,
        }
    }

    /// Filename prefix for matched sections.
    pub fn section_prefix(self) -> &'static str {
        SECTION_PREFIX
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::SectionAware => "section-aware",
        }
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Container shape of an output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerKind {
    /// Root holds one object bank named after the group key.
    Flat { group_key: String },

    /// Root holds an assessment (with optional copied metadata) wrapping one
    /// object bank, named after a section.
    Assessment { ident: String, title: String },
}

/// One output file produced by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,

    /// Group key or section title the file was built from.
    pub group_key: String,

    pub item_count: usize,
}

/// A matched section that held no items and produced no file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSection {
    pub title: String,
    pub ident: String,
}

/// Files written by a successful extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    pub written: Vec<WrittenFile>,
    pub skipped: Vec<SkippedSection>,

    /// Number of items copied across all written files.
    pub matched_items: usize,

    /// Number of sections matched by the pattern (section-aware mode only).
    pub matched_sections: usize,
}

/// Result of an extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    Extracted(ExtractionReport),

    /// Nothing matched. Carries every distinct non-empty title in the
    /// source, sorted, so the caller can refine the pattern.
    NoMatch { available_titles: Vec<String> },
}

impl ExtractionOutcome {
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch { .. })
    }

    /// Files written, empty for a no-match outcome.
    pub fn written(&self) -> &[WrittenFile] {
        match self {
            Self::Extracted(report) => &report.written,
            Self::NoMatch { .. } => &[],
        }
    }
}

/// A section entry in a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionEntry {
    pub title: String,
    pub ident: String,
}

/// A derived item title prefix and the number of items that share it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixCount {
    pub prefix: String,
    pub count: usize,
}

/// Titles available in a source document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub sections: Vec<SectionEntry>,

    /// Total `section` elements in the document, before filtering.
    pub total_sections: usize,

    /// Item prefixes sorted by prefix.
    pub item_prefixes: Vec<PrefixCount>,

    /// Total `item` elements in the document, before filtering.
    pub total_items: usize,
}

impl Listing {
    /// Number of items covered by the listed prefixes.
    pub fn listed_items(&self) -> usize {
        self.item_prefixes.iter().map(|p| p.count).sum()
    }
}
