//! XML reading, copying and writing.

mod element;
mod utils;
mod writer;

pub use element::{Element, XmlNode};
pub use utils::{
    describe_element, find_child, find_descendants, get_attribute_or_empty, get_tag_name, has_tag,
};
pub use writer::{parse_source, read_source, serialize, write_document};
