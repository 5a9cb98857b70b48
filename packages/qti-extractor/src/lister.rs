//! Listing of the sections and item titles available in a source file.

use std::collections::BTreeMap;
use std::path::Path;

use roxmltree::Document;
use tracing::debug;

use crate::config::{IDENT_ATTR, ITEM_TAG, SECTION_TAG, SECTION_WORD_COUNT};
use crate::error::Result;
use crate::grouping::group_key;
use crate::matcher::{element_title, matches};
use crate::types::{Listing, PrefixCount, SectionEntry};
use crate::xml::{find_descendants, get_attribute_or_empty, parse_source, read_source};

/// List sections and item title prefixes in `input`, optionally filtered.
///
/// Never writes any file.
pub fn list_titles(input: &Path, pattern: Option<&str>) -> Result<Listing> {
    let text = read_source(input)?;
    let doc = parse_source(&text, input)?;
    Ok(list_document(&doc, pattern))
}

/// Build a listing for an already parsed document.
///
/// Sections and items are both filtered on their full title. Matching items
/// are then counted under the first three words of their title.
pub fn list_document(doc: &Document<'_>, pattern: Option<&str>) -> Listing {
    let pattern = pattern.unwrap_or_default();
    let mut listing = Listing::default();

    for section in find_descendants(doc.root(), SECTION_TAG) {
        listing.total_sections += 1;
        let title = element_title(section);
        if matches(pattern, title) {
            listing.sections.push(SectionEntry {
                title: title.to_string(),
                ident: get_attribute_or_empty(section, IDENT_ATTR).to_string(),
            });
        }
    }

    let mut prefixes: BTreeMap<String, usize> = BTreeMap::new();
    for item in find_descendants(doc.root(), ITEM_TAG) {
        listing.total_items += 1;
        let title = element_title(item);
        if matches(pattern, title) {
            let prefix = group_key(title, SECTION_WORD_COUNT);
            *prefixes.entry(prefix).or_default() += 1;
        }
    }
    listing.item_prefixes = prefixes
        .into_iter()
        .map(|(prefix, count)| PrefixCount { prefix, count })
        .collect();

    debug!(
        sections = listing.sections.len(),
        prefixes = listing.item_prefixes.len(),
        "Built title listing"
    );
    listing
}
