//! Output filename derivation.

/// Turn a group key into an output filename.
///
/// Keeps alphanumerics, spaces, underscores and hyphens, trims surrounding
/// whitespace, replaces spaces with underscores and wraps the result as
/// `{prefix}{name}.xml`. Distinct keys can map to the same filename; the
/// file written last wins.
///
/// # Examples
/// ```
/// use qti_extractor::filename::derive_filename;
///
/// assert_eq!(derive_filename("DCIT 408", "Questions_"), "Questions_DCIT_408.xml");
/// assert_eq!(derive_filename("Midterm: DCIT/318", ""), "Midterm_DCIT318.xml");
/// ```
pub fn derive_filename(key: &str, prefix: &str) -> String {
    let filtered: String = key
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect();
    let safe = filtered.trim().replace(' ', "_");
    format!("{prefix}{safe}.xml")
}

/// Whether a key keeps any characters after filtering.
pub fn has_safe_characters(key: &str) -> bool {
    key.chars()
        .any(|c| c.is_alphanumeric() || matches!(c, '_' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(derive_filename("DCIT 408", ""), "DCIT_408.xml");
        assert_eq!(derive_filename("DCIT 408", "Questions_"), "Questions_DCIT_408.xml");
        assert_eq!(
            derive_filename("DCIT 408 Networking", "Items_"),
            "Items_DCIT_408_Networking.xml"
        );
    }

    #[test]
    fn test_strips_disallowed_characters() {
        assert_eq!(derive_filename("C++ & Java (Intro)", ""), "C__Java_Intro.xml");
        assert_eq!(derive_filename("a/b\\c:d", ""), "abcd.xml");
    }

    #[test]
    fn test_trims_after_filtering() {
        assert_eq!(derive_filename("  ? Quiz 1 ?  ", ""), "Quiz_1.xml");
    }

    #[test]
    fn test_keeps_unicode_alphanumerics() {
        assert_eq!(derive_filename("Économie 101", ""), "Économie_101.xml");
    }

    #[test]
    fn test_stable() {
        let key = "DCIT 318: Midterm!";
        assert_eq!(derive_filename(key, "Items_"), derive_filename(key, "Items_"));
    }

    #[test]
    fn test_collisions_are_possible() {
        assert_eq!(derive_filename("DCIT 408?", ""), derive_filename("DCIT 408!", ""));
    }

    #[test]
    fn test_has_safe_characters() {
        assert!(has_safe_characters("Quiz 1"));
        assert!(!has_safe_characters(" ?! "));
        assert!(!has_safe_characters(""));
    }
}
