//! Batch document serialization.

use std::fmt::Display;
use std::io::Write;

use batch_model::{Document, NodeId};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::{Result, StoreError};

/// Render a document as indented UTF-8 XML with a trailing newline.
pub fn write_document(document: &Document) -> Result<Vec<u8>> {
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(serialization)?;
    write_element(&mut xml, document, document.root())?;
    let mut bytes = xml.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

fn write_element<W: Write>(xml: &mut Writer<W>, document: &Document, id: NodeId) -> Result<()> {
    let element = document.element(id).map_err(serialization)?;
    let mut start = BytesStart::new(element.tag());
    for (key, value) in element.attributes() {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    let text = element.text().filter(|text| !text.is_empty());
    if element.children().is_empty() && text.is_none() {
        return xml.write_event(Event::Empty(start)).map_err(serialization);
    }

    xml.write_event(Event::Start(start)).map_err(serialization)?;
    if let Some(text) = text {
        xml.write_event(Event::Text(BytesText::new(text)))
            .map_err(serialization)?;
    }
    for child in element.children() {
        write_element(xml, document, *child)?;
    }
    xml.write_event(Event::End(BytesEnd::new(element.tag())))
        .map_err(serialization)
}

fn serialization(error: impl Display) -> StoreError {
    StoreError::Serialization {
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use batch_model::ElementTree;

    fn render(tree: ElementTree) -> String {
        String::from_utf8(write_document(&Document::from_tree(tree)).unwrap()).unwrap()
    }

    #[test]
    fn empty_root_is_self_closing() {
        let xml = render(ElementTree::new("ComponentSets"));
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<ComponentSets/>\n"
        );
    }

    #[test]
    fn escapes_text_and_attributes() {
        let xml = render(
            ElementTree::new("a")
                .with_attribute("name", "x & \"y\"")
                .with_child(ElementTree::new("b").with_text("1 < 2")),
        );
        assert!(xml.contains("name=\"x &amp; &quot;y&quot;\""), "{xml}");
        assert!(xml.contains("<b>1 &lt; 2</b>"), "{xml}");
    }
}
