//! Owned element tree used to assemble output documents.
//!
//! A roxmltree document borrows its source text and cannot be modified, so
//! every item placed into an output document is copied into an [`Element`].
//! The copy owns all of its data; changing it never touches the source
//! document or any other copy.

use std::collections::BTreeSet;

use roxmltree::Node;

use super::utils::get_tag_name;
use crate::config::XML_NAMESPACE;

/// A node inside an owned element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(Element),
    Text(String),
}

/// An owned XML element with qualified names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Qualified tag name (`prefix:local` or `local`).
    pub name: String,

    /// Attributes in source order, keyed by qualified name.
    pub attributes: Vec<(String, String)>,

    pub children: Vec<XmlNode>,
}

impl Element {
    /// Create an empty element.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style variant of [`Element::set_attribute`].
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Get an attribute value by qualified name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Append a child element.
    pub fn push_element(&mut self, child: Element) {
        self.children.push(XmlNode::Element(child));
    }

    /// Iterate over child elements, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    /// Mutable variant of [`Element::child_elements`].
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|child| match child {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    /// Concatenated direct text content.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                XmlNode::Text(t) => Some(t.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    /// Deep-copy a source element and everything beneath it.
    ///
    /// Whitespace-only text, comments and processing instructions are not
    /// copied. Namespace prefixes used inside the copy and in scope at `node`
    /// are declared on the returned element so it stays well-formed when
    /// re-rooted. Namespaces bound below `node` are declared where the source
    /// binds them.
    pub fn deep_copy(node: Node<'_, '_>) -> Self {
        let mut copy = copy_element(node, None);

        let mut used = BTreeSet::new();
        collect_prefixes(&copy, &mut used);
        for ns in node.namespaces() {
            if let Some(prefix) = ns.name() {
                if used.contains(prefix) {
                    copy.set_attribute(format!("xmlns:{prefix}"), ns.uri());
                }
            }
        }
        copy
    }
}

fn collect_prefixes(element: &Element, used: &mut BTreeSet<String>) {
    let names = std::iter::once(&element.name).chain(element.attributes.iter().map(|(n, _)| n));
    for name in names {
        if let Some((prefix, _)) = name.split_once(':') {
            if prefix != "xml" && prefix != "xmlns" {
                used.insert(prefix.to_string());
            }
        }
    }
    for child in element.child_elements() {
        collect_prefixes(child, used);
    }
}

fn copy_element(node: Node<'_, '_>, parent: Option<Node<'_, '_>>) -> Element {
    let mut element = Element::new(element_name(node));
    if let Some(parent) = parent {
        declare_new_namespaces(&mut element, node, parent);
    }

    for attr in node.attributes() {
        let name = match attr.namespace() {
            Some(XML_NAMESPACE) => format!("xml:{}", attr.name()),
            Some(uri) => match node.lookup_prefix(uri) {
                Some(prefix) => format!("{prefix}:{}", attr.name()),
                None => attr.name().to_string(),
            },
            None => attr.name().to_string(),
        };
        element.attributes.push((name, attr.value().to_string()));
    }

    for child in node.children() {
        if child.is_element() {
            element.push_element(copy_element(child, Some(node)));
        } else if child.is_text() {
            if let Some(text) = child.text() {
                if !text.trim().is_empty() {
                    element.children.push(XmlNode::Text(text.to_string()));
                }
            }
        }
    }

    element
}

/// Declare the namespaces `node` binds on top of those in scope at `parent`.
fn declare_new_namespaces(element: &mut Element, node: Node<'_, '_>, parent: Node<'_, '_>) {
    let default = default_namespace(node);
    if default != default_namespace(parent) {
        element
            .attributes
            .push(("xmlns".to_string(), default.unwrap_or_default().to_string()));
    }

    for ns in node.namespaces() {
        let Some(prefix) = ns.name() else {
            continue;
        };
        if prefix == "xml" {
            continue;
        }
        let inherited = parent
            .namespaces()
            .any(|p| p.name() == Some(prefix) && p.uri() == ns.uri());
        if !inherited {
            element
                .attributes
                .push((format!("xmlns:{prefix}"), ns.uri().to_string()));
        }
    }
}

fn default_namespace<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.namespaces()
        .find(|ns| ns.name().is_none())
        .map(|ns| ns.uri())
}

fn element_name(node: Node<'_, '_>) -> String {
    let local = get_tag_name(node);
    let prefix = match node.tag_name().namespace() {
        Some(uri) if default_namespace(node) == Some(uri) => None,
        Some(uri) => node.lookup_prefix(uri),
        None => None,
    };
    match prefix {
        Some(prefix) => format!("{prefix}:{local}"),
        None => local.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QTI_NAMESPACE;
    use crate::xml::serialize;
    use pretty_assertions::assert_eq;
    use roxmltree::Document;

    #[test]
    fn test_deep_copy_structure() {
        let xml = r#"<item ident="Q1" title="DCIT 408 Basics">
            <presentation>
                <material><mattext texttype="text/plain">What is TCP?</mattext></material>
            </presentation>
        </item>"#;
        let doc = Document::parse(xml).unwrap();
        let copy = Element::deep_copy(doc.root_element());

        let expected = Element::new("item")
            .with_attribute("ident", "Q1")
            .with_attribute("title", "DCIT 408 Basics");
        assert_eq!(copy.name, expected.name);
        assert_eq!(copy.attributes, expected.attributes);

        let presentation = copy.child_elements().next().unwrap();
        assert_eq!(presentation.name, "presentation");
        let material = presentation.child_elements().next().unwrap();
        let mattext = material.child_elements().next().unwrap();
        assert_eq!(mattext.attribute("texttype"), Some("text/plain"));
        assert_eq!(mattext.text(), "What is TCP?");
    }

    #[test]
    fn test_deep_copy_is_independent() {
        let xml = r#"<bank><item ident="Q1"><mattext>A</mattext></item></bank>"#;
        let doc = Document::parse(xml).unwrap();
        let source = doc.root_element().first_element_child().unwrap();

        let first = Element::deep_copy(source);
        let mut second = Element::deep_copy(source);
        second.set_attribute("ident", "CHANGED");
        second.children.clear();

        assert_eq!(first.attribute("ident"), Some("Q1"));
        assert_eq!(first.child_elements().count(), 1);
        assert_eq!(source.attribute("ident"), Some("Q1"));
        assert_eq!(Element::deep_copy(source), first);
    }

    #[test]
    fn test_deep_copy_keeps_mixed_text() {
        let xml = r#"<mattext>Pick <b>one</b> answer</mattext>"#;
        let doc = Document::parse(xml).unwrap();
        let copy = Element::deep_copy(doc.root_element());

        assert_eq!(copy.children.len(), 3);
        assert_eq!(copy.text(), "Pick  answer");
    }

    #[test]
    fn test_deep_copy_redeclares_prefixes() {
        let xml = r#"<root xmlns:ext="urn:ext"><item ext:score="2"><ext:hint/></item></root>"#;
        let doc = Document::parse(xml).unwrap();
        let item = doc.root_element().first_element_child().unwrap();
        let copy = Element::deep_copy(item);

        assert_eq!(copy.attribute("ext:score"), Some("2"));
        assert_eq!(copy.attribute("xmlns:ext"), Some("urn:ext"));
        assert_eq!(copy.child_elements().next().unwrap().name, "ext:hint");
    }

    #[test]
    fn test_deep_copy_skips_unused_prefixes() {
        let xml = r#"<root xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><item ident="Q1"/></root>"#;
        let doc = Document::parse(xml).unwrap();
        let item = doc.root_element().first_element_child().unwrap();

        let copy = Element::deep_copy(item);
        assert_eq!(copy.attributes, vec![("ident".to_string(), "Q1".to_string())]);
    }

    fn reparse_under_qti_root(copy: Element) -> String {
        let mut root = Element::new("questestinterop").with_attribute("xmlns", QTI_NAMESPACE);
        root.push_element(copy);
        String::from_utf8(serialize(&root).unwrap()).unwrap()
    }

    #[test]
    fn test_nested_prefix_declaration_is_kept() {
        let xml = r#"<item ident="Q1"><mattext><m:math xmlns:m="http://www.w3.org/1998/Math/MathML"><m:mi>x</m:mi></m:math></mattext></item>"#;
        let doc = Document::parse(xml).unwrap();
        let copy = Element::deep_copy(doc.root_element());

        let output = reparse_under_qti_root(copy);
        let reparsed = Document::parse(&output).unwrap();
        let mi = reparsed
            .descendants()
            .find(|n| n.is_element() && get_tag_name(*n) == "mi")
            .unwrap();
        assert_eq!(
            mi.tag_name().namespace(),
            Some("http://www.w3.org/1998/Math/MathML")
        );
    }

    #[test]
    fn test_nested_default_namespace_is_kept() {
        let xml = r#"<item xmlns="http://www.imsglobal.org/xsd/ims_qtiasiv1p2" ident="Q1"><mattext><math xmlns="http://www.w3.org/1998/Math/MathML"><mi>x</mi></math></mattext></item>"#;
        let doc = Document::parse(xml).unwrap();
        let copy = Element::deep_copy(doc.root_element());

        let math = copy.child_elements().next().unwrap().child_elements().next().unwrap();
        assert_eq!(math.name, "math");
        assert_eq!(math.attribute("xmlns"), Some("http://www.w3.org/1998/Math/MathML"));

        let output = reparse_under_qti_root(copy);
        let reparsed = Document::parse(&output).unwrap();
        for name in ["math", "mi"] {
            let node = reparsed
                .descendants()
                .find(|n| n.is_element() && get_tag_name(*n) == name)
                .unwrap();
            assert_eq!(
                node.tag_name().namespace(),
                Some("http://www.w3.org/1998/Math/MathML")
            );
        }
        let item = reparsed.root_element().first_element_child().unwrap();
        assert_eq!(item.tag_name().namespace(), Some(QTI_NAMESPACE));
    }

    #[test]
    fn test_unchanged_namespaces_are_not_redeclared() {
        let xml = r#"<item xmlns="urn:a" xmlns:m="urn:m"><m:hint><m:x/></m:hint><mattext/></item>"#;
        let doc = Document::parse(xml).unwrap();
        let copy = Element::deep_copy(doc.root_element());

        for child in copy.child_elements() {
            assert!(child.attributes.is_empty(), "{} redeclared", child.name);
        }
    }

    #[test]
    fn test_xml_lang_attribute() {
        let xml = r#"<mattext xml:lang="en">Hi</mattext>"#;
        let doc = Document::parse(xml).unwrap();
        let copy = Element::deep_copy(doc.root_element());

        assert_eq!(copy.attribute("xml:lang"), Some("en"));
        assert!(copy.attribute("xmlns:xml").is_none());
    }

    #[test]
    fn test_set_attribute_replaces() {
        let mut e = Element::new("objectbank").with_attribute("ident", "A");
        e.set_attribute("ident", "B");
        assert_eq!(e.attributes, vec![("ident".to_string(), "B".to_string())]);
    }
}
