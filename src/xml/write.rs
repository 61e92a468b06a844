use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Cursor;
use std::path::Path;

use super::{Document, Element, Node};
use crate::core::FilterError;

fn xml_io(e: std::io::Error) -> FilterError {
    FilterError::Xml(format!("XML write error: {e}"))
}

/// Serializes a [`Document`] as UTF-8 with an XML declaration.
pub struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    pub fn new() -> Result<Self, FilterError> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(xml_io)?;
        Ok(Self { writer })
    }

    pub fn into_string(self) -> Result<String, FilterError> {
        let buf = self.writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| FilterError::Xml(format!("XML UTF-8 error: {e}")))
    }

    /// Write `element` and its subtree. Childless elements become `<name/>`.
    pub fn element(&mut self, element: &Element) -> Result<&mut Self, FilterError> {
        let mut start = BytesStart::new(element.name.as_str());
        for (k, v) in &element.attributes {
            start.push_attribute((k.as_str(), v.as_str()));
        }

        if element.children.is_empty() {
            self.writer
                .write_event(Event::Empty(start))
                .map_err(xml_io)?;
            return Ok(self);
        }

        self.writer
            .write_event(Event::Start(start))
            .map_err(xml_io)?;
        for child in &element.children {
            match child {
                Node::Element(e) => {
                    self.element(e)?;
                }
                Node::Text(t) => {
                    self.writer
                        .write_event(Event::Text(BytesText::new(t)))
                        .map_err(xml_io)?;
                }
            }
        }
        self.writer
            .write_event(Event::End(BytesEnd::new(element.name.as_str())))
            .map_err(xml_io)?;
        Ok(self)
    }
}

/// Serialize `document` to a string.
pub fn to_xml_string(document: &Document) -> Result<String, FilterError> {
    let mut w = XmlWriter::new()?;
    w.element(&document.root)?;
    w.into_string()
}

/// Serialize `document` and write it to `path`, replacing any existing file.
pub fn write_document(document: &Document, path: impl AsRef<Path>) -> Result<(), FilterError> {
    let path = path.as_ref();
    let xml = to_xml_string(document)?;
    std::fs::write(path, xml).map_err(|e| FilterError::io(path, e))?;
    tracing::info!(path = %path.display(), "wrote filtered XML");
    Ok(())
}
