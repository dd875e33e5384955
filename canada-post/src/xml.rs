//! XML helpers shared by the service operations.
//!
//! Responses are parsed into `xmltree` elements. xmltree keeps the local name
//! of every element separate from its namespace, so lookups by plain names
//! such as `price-quote` or `code` work even when Canada Post declares a
//! default namespace on the document. Request documents are written with
//! the quick-xml writer.

use crate::{ApiError, Result};
use quick_xml::events::BytesText;
use quick_xml::Writer;
use std::io::Write;
use xmltree::{Element, XMLNode};

/// Parse a response body into its root element
pub fn parse_document(body: &[u8]) -> Result<Element> {
    Element::parse(body).map_err(|e| ApiError::Protocol(format!("Invalid XML response: {}", e)))
}

/// Direct child elements with the given local name, in document order
pub fn children_named<'a>(
    element: &'a Element,
    name: &'a str,
) -> impl Iterator<Item = &'a Element> + 'a {
    element
        .children
        .iter()
        .filter_map(XMLNode::as_element)
        .filter(move |child| child.name == name)
}

/// First descendant with the given local name, searched depth-first in
/// document order. The element itself is not considered.
pub fn find_descendant<'a>(element: &'a Element, name: &str) -> Option<&'a Element> {
    for child in element.children.iter().filter_map(XMLNode::as_element) {
        if child.name == name {
            return Some(child);
        }
        if let Some(found) = find_descendant(child, name) {
            return Some(found);
        }
    }
    None
}

/// Trimmed text of a direct child, if present and non-empty
pub fn child_text(element: &Element, name: &str) -> Option<String> {
    element
        .get_child(name)
        .and_then(|child| child.get_text())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Create a writer, indenting by two spaces when `pretty` is set
pub fn writer(pretty: bool) -> Writer<Vec<u8>> {
    if pretty {
        Writer::new_with_indent(Vec::new(), b' ', 2)
    } else {
        Writer::new(Vec::new())
    }
}

/// Write `<name>text</name>`
pub fn write_leaf<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> quick_xml::Result<()> {
    writer
        .create_element(name)
        .write_text_content(BytesText::new(text))?;
    Ok(())
}
