//! Title-based grouping of matched items.
//!
//! Items are clustered by the first few words of their title. Titles that
//! only differ after those words end up in the same group.

use roxmltree::Node;

use crate::config::MISCELLANEOUS_KEY;
use crate::matcher::element_title;

/// Derive the group key for a title.
///
/// Takes the first `word_count` whitespace-separated words joined by a single
/// space. Titles with fewer words use their first word, and titles without
/// any words use `"Miscellaneous"`.
///
/// # Examples
/// ```
/// use qti_extractor::grouping::group_key;
///
/// assert_eq!(group_key("DCIT 408 Networking Basics", 2), "DCIT 408");
/// assert_eq!(group_key("DCIT 408 Networking Basics", 3), "DCIT 408 Networking");
/// assert_eq!(group_key("Recap", 3), "Recap");
/// assert_eq!(group_key("   ", 2), "Miscellaneous");
/// ```
pub fn group_key(title: &str, word_count: usize) -> String {
    let words: Vec<&str> = title.split_whitespace().collect();
    if words.len() >= word_count {
        words[..word_count].join(" ")
    } else if let Some(first) = words.first() {
        (*first).to_string()
    } else {
        MISCELLANEOUS_KEY.to_string()
    }
}

/// Items sharing a group key.
#[derive(Debug, Clone)]
pub struct ItemGroup<'a, 'input> {
    pub key: String,
    pub items: Vec<Node<'a, 'input>>,
}

/// Cluster items by [`group_key`] of their titles.
///
/// Groups appear in order of the first item carrying their key; items keep
/// their relative order within a group.
pub fn group_by_key<'a, 'input>(
    items: impl IntoIterator<Item = Node<'a, 'input>>,
    word_count: usize,
) -> Vec<ItemGroup<'a, 'input>> {
    let mut groups: Vec<ItemGroup<'a, 'input>> = Vec::new();

    for item in items {
        let key = group_key(element_title(item), word_count);
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.items.push(item),
            None => groups.push(ItemGroup {
                key,
                items: vec![item],
            }),
        }
    }

    groups
}
