//! Construction of output documents.

use roxmltree::{Document, Node};

use crate::config::{
    ASSESSMENT_METADATA_TAG, ASSESSMENT_TAG, BANK_SUFFIX, EXTRACTED_SUFFIX, IDENT_ATTR,
    OBJECT_BANK_TAG, QTI_NAMESPACE, QTI_SCHEMA_LOCATION, ROOT_TAG, TITLE_ATTR, XSI_NAMESPACE,
};
use crate::types::ContainerKind;
use crate::xml::{find_child, has_tag, Element};

/// Create an empty output root with the QTI namespace and schema location.
pub fn qti_root() -> Element {
    Element::new(ROOT_TAG)
        .with_attribute("xmlns", QTI_NAMESPACE)
        .with_attribute("xmlns:xsi", XSI_NAMESPACE)
        .with_attribute("xsi:schemaLocation", QTI_SCHEMA_LOCATION)
}

/// Identifier form of a group key: uppercased, spaces replaced by underscores.
///
/// # Examples
/// ```
/// use qti_extractor::builder::key_ident;
///
/// assert_eq!(key_ident("DCIT 408"), "DCIT_408");
/// ```
pub fn key_ident(key: &str) -> String {
    key.replace(' ', "_").to_uppercase()
}

/// Find the metadata block of the first assessment in the source, if any.
pub fn find_assessment_metadata<'a, 'input>(doc: &'a Document<'input>) -> Option<Node<'a, 'input>> {
    let assessment = doc.descendants().find(|n| has_tag(*n, ASSESSMENT_TAG))?;
    find_child(assessment, ASSESSMENT_METADATA_TAG)
}

/// Build an output document of the given container kind.
///
/// `metadata` is only used by [`ContainerKind::Assessment`].
pub fn build_document(
    kind: &ContainerKind,
    items: &[Node<'_, '_>],
    metadata: Option<Node<'_, '_>>,
) -> Element {
    match kind {
        ContainerKind::Flat { group_key } => build_flat_document(group_key, items),
        ContainerKind::Assessment { ident, title } => {
            build_assessment_document(ident, title, metadata, items)
        }
    }
}

/// Root containing a single object bank with copies of `items`.
pub fn build_flat_document(group_key: &str, items: &[Node<'_, '_>]) -> Element {
    let bank_ident = format!("{}{BANK_SUFFIX}", key_ident(group_key));

    let mut root = qti_root();
    root.push_element(object_bank(bank_ident, items));
    root
}

/// Root containing an assessment named after a section, holding the copied
/// metadata (if any) followed by an object bank with copies of `items`.
pub fn build_assessment_document(
    section_ident: &str,
    section_title: &str,
    metadata: Option<Node<'_, '_>>,
    items: &[Node<'_, '_>],
) -> Element {
    let mut assessment = Element::new(ASSESSMENT_TAG)
        .with_attribute(IDENT_ATTR, format!("{section_ident}{EXTRACTED_SUFFIX}"))
        .with_attribute(TITLE_ATTR, section_title);

    if let Some(metadata) = metadata {
        assessment.push_element(Element::deep_copy(metadata));
    }
    assessment.push_element(object_bank(format!("{section_ident}{BANK_SUFFIX}"), items));

    let mut root = qti_root();
    root.push_element(assessment);
    root
}

fn object_bank(ident: String, items: &[Node<'_, '_>]) -> Element {
    let mut bank = Element::new(OBJECT_BANK_TAG).with_attribute(IDENT_ATTR, ident);
    for item in items {
        bank.push_element(Element::deep_copy(*item));
    }
    bank
}
