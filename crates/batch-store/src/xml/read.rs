//! Batch document parsing.

use std::fmt::Display;

use batch_model::{Document, ElementTree};
use quick_xml::Reader;
use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::{BytesStart, Event};

use super::XmlError;

/// Parse XML text into a [`Document`].
pub fn parse_document(content: &str) -> Result<Document, XmlError> {
    parse_tree(content).map(Document::from_tree)
}

/// Parse XML text into a nested [`ElementTree`].
///
/// Element text is trimmed and whitespace-only text is dropped. Comments,
/// processing instructions and the XML declaration are ignored.
pub fn parse_tree(content: &str) -> Result<ElementTree, XmlError> {
    let mut reader = Reader::from_str(content);
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: Option<ElementTree> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| malformed(&reader, e))?;
        match event {
            Event::Start(start) => {
                if root.is_some() && stack.is_empty() {
                    return Err(XmlError::MultipleRoots);
                }
                stack.push(OpenElement::new(element_from_start(&reader, &start)?));
            }
            Event::Empty(start) => {
                if root.is_some() && stack.is_empty() {
                    return Err(XmlError::MultipleRoots);
                }
                let element = element_from_start(&reader, &start)?;
                close(&mut stack, &mut root, element);
            }
            Event::End(_) => {
                let Some(open) = stack.pop() else {
                    return Err(XmlError::Malformed {
                        position: reader.buffer_position() as u64,
                        message: "closing tag without an open element".to_string(),
                    });
                };
                close(&mut stack, &mut root, open.finish());
            }
            Event::Text(text) => {
                let text = reader
                    .decoder()
                    .decode(&text)
                    .map_err(|e| malformed(&reader, e))?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(data) => {
                let data = reader
                    .decoder()
                    .decode(&data)
                    .map_err(|e| malformed(&reader, e))?;
                push_text(&mut stack, &data)?;
            }
            Event::GeneralRef(reference) => {
                let resolved = match reference
                    .resolve_char_ref()
                    .map_err(|e| malformed(&reader, e))?
                {
                    Some(ch) => ch.to_string(),
                    None => {
                        let name = reader
                            .decoder()
                            .decode(&reference)
                            .map_err(|e| malformed(&reader, e))?;
                        resolve_xml_entity(&name)
                            .ok_or_else(|| XmlError::UnknownEntity(name.to_string()))?
                            .to_string()
                    }
                };
                push_text(&mut stack, &resolved)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(XmlError::Unclosed(open.element.tag));
    }
    root.ok_or(XmlError::MissingRoot)
}

struct OpenElement {
    element: ElementTree,
    text: String,
}

impl OpenElement {
    fn new(element: ElementTree) -> Self {
        Self {
            element,
            text: String::new(),
        }
    }

    fn finish(mut self) -> ElementTree {
        let trimmed = self.text.trim();
        if !trimmed.is_empty() {
            self.element.text = Some(trimmed.to_string());
        }
        self.element
    }
}

fn close(stack: &mut [OpenElement], root: &mut Option<ElementTree>, element: ElementTree) {
    match stack.last_mut() {
        Some(parent) => parent.element.children.push(element),
        None => *root = Some(element),
    }
}

fn push_text(stack: &mut [OpenElement], text: &str) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(open) => {
            open.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(XmlError::TextOutsideRoot),
    }
}

fn element_from_start(
    reader: &Reader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<ElementTree, XmlError> {
    let decoder = reader.decoder();
    let name = start.name();
    let tag = decoder
        .decode(name.as_ref())
        .map_err(|e| malformed(reader, e))?;
    let mut element = ElementTree::new(tag);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| malformed(reader, e))?;
        let key = decoder
            .decode(attribute.key.as_ref())
            .map_err(|e| malformed(reader, e))?
            .into_owned();
        let value = attribute
            .decode_and_unescape_value(decoder)
            .map_err(|e| malformed(reader, e))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn malformed(reader: &Reader<&[u8]>, error: impl Display) -> XmlError {
    XmlError::Malformed {
        position: reader.buffer_position() as u64,
        message: error.to_string(),
    }
}
