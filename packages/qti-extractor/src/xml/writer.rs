//! Reading source files and writing output documents.

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::Writer;
use roxmltree::{Document, ParsingOptions};

use super::element::{Element, XmlNode};
use crate::config::INDENT_WIDTH;
use crate::error::{ExtractorError, Result};

/// Read an input file into memory.
///
/// Fails with [`ExtractorError::MissingFile`] when `path` is not an existing file.
pub fn read_source(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(ExtractorError::MissingFile(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}

/// Parse source text into a read-only document.
///
/// DTDs are accepted since QTI exports commonly carry a DOCTYPE.
pub fn parse_source<'input>(text: &'input str, path: &Path) -> Result<Document<'input>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(text, options).map_err(|source| ExtractorError::XmlParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize an element tree as a UTF-8 document with an XML declaration
/// and two-space indentation.
pub fn serialize(root: &Element) -> io::Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_WIDTH);
    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    write_element(&mut writer, root)?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

/// Serialize `root` and write it to `path`.
///
/// The document is written to a hidden temporary file next to `path` and
/// renamed into place. An existing file at `path` is overwritten.
pub fn write_document(root: &Element, path: &Path) -> Result<()> {
    let content = serialize(root).map_err(|e| ExtractorError::XmlWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(&content)?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    Ok(())
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> io::Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (name, value) in &element.attributes {
        start.push_attribute(Attribute {
            key: QName(name.as_bytes()),
            value: Cow::Owned(escape_attribute(value).into_bytes()),
        });
    }

    if element.children.is_empty() {
        return emit(writer, Event::Empty(start));
    }

    emit(writer, Event::Start(start))?;
    for child in &element.children {
        match child {
            XmlNode::Element(e) => write_element(writer, e)?,
            XmlNode::Text(t) => emit(writer, Event::Text(BytesText::new(t)))?,
        }
    }
    emit(writer, Event::End(BytesEnd::new(element.name.as_str())))
}

/// Escape an attribute value, including whitespace that parsers would
/// otherwise normalize to spaces.
fn escape_attribute(value: &str) -> String {
    escape(value)
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
        .replace('\t', "&#9;")
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> io::Result<()> {
    writer.write_event(event).map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn sample_tree() -> Element {
        let mut bank = Element::new("objectbank").with_attribute("ident", "DCIT_408_BANK");
        let mut item = Element::new("item").with_attribute("title", "Q & A");
        item.children.push(XmlNode::Text("1 < 2".to_string()));
        bank.push_element(item);
        bank.push_element(Element::new("item").with_attribute("ident", "Q2"));

        let mut root = Element::new("questestinterop");
        root.push_element(bank);
        root
    }

    #[test]
    fn test_serialize_layout() {
        let bytes = serialize(&sample_tree()).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(
            text,
            concat!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
                "<questestinterop>\n",
                "  <objectbank ident=\"DCIT_408_BANK\">\n",
                "    <item title=\"Q &amp; A\">1 &lt; 2</item>\n",
                "    <item ident=\"Q2\"/>\n",
                "  </objectbank>\n",
                "</questestinterop>\n",
            )
        );
    }

    #[test]
    fn test_serialized_output_parses_back() {
        let bytes = serialize(&sample_tree()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let doc = Document::parse(&text).unwrap();

        let item = doc
            .descendants()
            .find(|n| n.has_tag_name("item"))
            .unwrap();
        assert_eq!(item.attribute("title"), Some("Q & A"));
        assert_eq!(item.text(), Some("1 < 2"));
    }

    #[test]
    fn test_attribute_whitespace_round_trips() {
        let root = Element::new("item").with_attribute("title", "Line one\nLine two\tend");
        let text = String::from_utf8(serialize(&root).unwrap()).unwrap();

        assert!(text.contains(r#"title="Line one&#10;Line two&#9;end""#));
        let doc = Document::parse(&text).unwrap();
        assert_eq!(
            doc.root_element().attribute("title"),
            Some("Line one\nLine two\tend")
        );
    }

    #[test]
    fn test_write_document_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Questions_DCIT_408.xml");

        write_document(&Element::new("first"), &path).unwrap();
        write_document(&sample_tree(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("<questestinterop>"));
        assert!(!content.contains("<first/>"));
        assert!(!dir.path().join(".Questions_DCIT_408.xml.tmp").exists());
    }

    #[test]
    fn test_read_source_missing_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.xml");

        let err = read_source(&missing).unwrap_err();
        assert!(matches!(err, ExtractorError::MissingFile(p) if p == missing));
    }

    #[test]
    fn test_parse_source_accepts_doctype() {
        let text = r#"<?xml version="1.0"?>
<!DOCTYPE questestinterop SYSTEM "ims_qtiasiv1p2.dtd">
<questestinterop><item ident="Q1"/></questestinterop>"#;
        let doc = parse_source(text, Path::new("bank.xml")).unwrap();
        assert_eq!(doc.root_element().tag_name().name(), "questestinterop");
    }

    #[test]
    fn test_parse_source_reports_malformed() {
        let err = parse_source("<questestinterop>", Path::new("bank.xml")).unwrap_err();
        assert!(matches!(err, ExtractorError::XmlParse { .. }));
    }
}
