//! Case-insensitive title matching.

use roxmltree::Node;

use crate::config::TITLE_ATTR;
use crate::xml::get_attribute_or_empty;

/// Check whether `pattern` occurs in `title`, ignoring case.
///
/// An empty pattern matches every title. No other normalization is applied.
///
/// # Examples
/// ```
/// use qti_extractor::matcher::matches;
///
/// assert!(matches("dcit 408", "DCIT 408 Networking Basics"));
/// assert!(matches("", ""));
/// assert!(!matches("DCIT 318", "DCIT 408 Networking Basics"));
/// ```
pub fn matches(pattern: &str, title: &str) -> bool {
    title.to_lowercase().contains(&pattern.to_lowercase())
}

/// The `title` attribute of an element, or the empty string when absent.
pub fn element_title<'a>(node: Node<'a, '_>) -> &'a str {
    get_attribute_or_empty(node, TITLE_ATTR)
}

/// Check an element's title against `pattern`.
pub fn element_matches(pattern: &str, node: Node<'_, '_>) -> bool {
    matches(pattern, element_title(node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_case_insensitive() {
        assert!(matches("DCIT 408", "dcit 408 networking"));
        assert!(matches("networking", "DCIT 408 NETWORKING"));
    }

    #[test]
    fn test_empty_pattern_matches_everything() {
        assert!(matches("", "anything"));
        assert!(matches("", ""));
    }

    #[test]
    fn test_no_whitespace_normalization() {
        assert!(!matches("DCIT  408", "DCIT 408"));
        assert!(!matches("DCIT408", "DCIT 408"));
    }

    #[test]
    fn test_no_regex_semantics() {
        assert!(!matches("DCIT.*", "DCIT 408"));
        assert!(matches("(a)", "Question (a)"));
    }

    #[test]
    fn test_missing_title_is_empty() {
        let doc = Document::parse(r#"<item ident="Q1"/>"#).unwrap();
        let item = doc.root_element();

        assert_eq!(element_title(item), "");
        assert!(element_matches("", item));
        assert!(!element_matches("DCIT", item));
    }
}
