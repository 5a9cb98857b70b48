//! Helpers for navigating roxmltree documents.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use qti_extractor::xml::get_tag_name;
///
/// let xml = r#"<questestinterop><item/></questestinterop>"#;
/// let doc = Document::parse(xml).unwrap();
/// let item = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(item), "item");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Check if a node is an element with the given tag name.
pub fn has_tag(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && get_tag_name(node) == tag
}

/// Find the first child element with the given tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use qti_extractor::xml::find_child;
///
/// let xml = r#"<assessment><assessmentmetadata/><section/></assessment>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
///
/// assert!(find_child(root, "assessmentmetadata").is_some());
/// assert!(find_child(root, "objectbank").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| has_tag(*child, tag))
}

/// Find all descendant elements with the given tag name, in document order.
///
/// The search is recursive and does not assume any nesting depth. The
/// starting node itself is not included.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use qti_extractor::xml::find_descendants;
///
/// let xml = r#"<root><item/><section><item/><item/></section></root>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let items: Vec<_> = find_descendants(doc.root_element(), "item").collect();
/// assert_eq!(items.len(), 3);
/// ```
pub fn find_descendants<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.descendants()
        .skip(1)
        .filter(move |child| has_tag(*child, tag))
}

/// Get an attribute value, treating a missing attribute as the empty string.
pub fn get_attribute_or_empty<'a>(node: Node<'a, '_>, name: &str) -> &'a str {
    node.attribute(name).unwrap_or_default()
}

/// Render an element's qualified name for debug output.
pub fn describe_element(node: Node<'_, '_>) -> String {
    match node.tag_name().namespace() {
        Some(ns) => format!("{{{ns}}}{}", get_tag_name(node)),
        None => get_tag_name(node).to_string(),
    }
}
