use quick_xml::Reader;
use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

use super::{Document, Element, Node};
use crate::core::FilterError;

/// Read and parse the export at `path`.
///
/// The file may use any encoding its BOM or XML declaration names
/// (e.g. `ISO-8859-1`); it is decoded before parsing.
pub fn load_document(path: impl AsRef<Path>) -> Result<Document, FilterError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| FilterError::io(path, e))?;
    let xml = decode_export(&bytes)?;
    let document = parse_document(&xml)?;
    tracing::info!(path = %path.display(), root = %document.root.name, "loaded XML export");
    Ok(document)
}

/// Parse an XML string into an owned [`Document`].
///
/// Whitespace text is kept as-is. The declaration, comments, processing
/// instructions and the doctype are skipped.
pub fn parse_document(xml: &str) -> Result<Document, FilterError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                stack.push(start_element(e, reader.decoder())?);
            }
            Ok(Event::Empty(ref e)) => {
                let element = start_element(e, reader.decoder())?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| FilterError::Xml("unexpected closing tag".into()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| FilterError::Xml(format!("invalid text: {e}")))?;
                push_text(&mut stack, &text)?;
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8(e.into_inner().into_owned())
                    .map_err(|e| FilterError::Xml(format!("CDATA is not UTF-8: {e}")))?;
                push_text(&mut stack, &text)?;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(FilterError::Xml(format!(
                    "XML parse error at byte {}: {e}",
                    reader.buffer_position()
                )));
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(FilterError::Xml(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }

    root.map(Document::new)
        .ok_or_else(|| FilterError::Xml("document has no root element".into()))
}

/// Decode raw file bytes to UTF-8 using the BOM or the declared encoding.
pub(crate) fn decode_export(bytes: &[u8]) -> Result<String, FilterError> {
    let mut reader = Reader::from_reader(bytes);
    // The declaration is the first event; reading it settles the decoder.
    // Parse errors surface again in `parse_document`.
    let _ = reader.read_event();
    let text = reader
        .decoder()
        .decode(bytes)
        .map_err(|e| FilterError::Xml(format!("invalid text for declared encoding: {e}")))?;
    Ok(text.trim_start_matches('\u{feff}').to_string())
}

fn start_element(e: &BytesStart<'_>, decoder: Decoder) -> Result<Element, FilterError> {
    let name = std::str::from_utf8(e.name().as_ref())
        .map_err(|err| FilterError::Xml(format!("element name is not UTF-8: {err}")))?
        .to_string();

    let mut element = Element::new(name);
    for attr in e.attributes() {
        let attr = attr.map_err(|err| FilterError::Xml(format!("invalid attribute: {err}")))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|err| FilterError::Xml(format!("attribute name is not UTF-8: {err}")))?
            .to_string();
        let value = attr
            .decode_and_unescape_value(decoder)
            .map_err(|err| FilterError::Xml(format!("invalid value for {key}: {err}")))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), FilterError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(FilterError::Xml(format!(
                "second root element <{}>",
                element.name
            )));
        }
    }
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str) -> Result<(), FilterError> {
    match stack.last_mut() {
        Some(parent) => {
            // Adjacent text and CDATA merge into one node.
            if let Some(Node::Text(prev)) = parent.children.last_mut() {
                prev.push_str(text);
            } else {
                parent.children.push(Node::Text(text.to_string()));
            }
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(FilterError::Xml("text outside the root element".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_and_attributes() {
        let doc = parse_document(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<Export version="2" source="ERP">
  <Customer><No>C1</No><Name>M&amp;M GmbH</Name></Customer>
  <Invoice><No>R1</No><Empty/></Invoice>
</Export>"#,
        )
        .unwrap();

        assert_eq!(doc.root.name, "Export");
        assert_eq!(doc.root.attribute("version"), Some("2"));
        assert_eq!(doc.root.attribute("source"), Some("ERP"));
        let customer = doc.root.child("Customer").unwrap();
        assert_eq!(customer.child_text("Name"), "M&M GmbH");
        let invoice = doc.root.child("Invoice").unwrap();
        assert!(invoice.child("Empty").unwrap().children.is_empty());
    }

    #[test]
    fn cdata_becomes_text() {
        let doc = parse_document("<R><Name><![CDATA[A & B]]></Name></R>").unwrap();
        assert_eq!(doc.root.child_text("Name"), "A & B");
    }

    #[test]
    fn comments_are_dropped() {
        let doc = parse_document("<R><!-- note --><No>1</No></R>").unwrap();
        assert_eq!(doc.root.children.len(), 1);
    }

    #[test]
    fn mismatched_end_tag_fails() {
        let err = parse_document("<R><No>1</Name></R>").unwrap_err();
        assert!(matches!(err, FilterError::Xml(_)));
    }

    #[test]
    fn unclosed_element_fails() {
        let err = parse_document("<R><No>1</No>").unwrap_err();
        assert!(matches!(err, FilterError::Xml(_)));
    }

    #[test]
    fn empty_input_fails() {
        let err = parse_document("").unwrap_err();
        assert!(err.to_string().contains("no root element"));
    }

    #[test]
    fn second_root_fails() {
        let err = parse_document("<A/><B/>").unwrap_err();
        assert!(err.to_string().contains("second root"));
    }

    #[test]
    fn latin1_export_is_decoded() {
        let mut bytes = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<Export><Customer><No>C1</No><City>K".to_vec();
        bytes.push(0xF6);
        bytes.extend_from_slice(b"ln</City></Customer></Export>");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.xml");
        std::fs::write(&path, &bytes).unwrap();

        let doc = load_document(&path).unwrap();
        let customer = doc.root.child("Customer").unwrap();
        assert_eq!(customer.child_text("City"), "Köln");
    }

    #[test]
    fn utf8_bom_is_skipped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("<Export><City>Köln</City></Export>".as_bytes());
        let xml = decode_export(&bytes).unwrap();
        assert!(xml.starts_with("<Export>"));
        assert_eq!(parse_document(&xml).unwrap().root.child_text("City"), "Köln");
    }

    #[test]
    fn undeclared_invalid_utf8_is_xml_error() {
        let err = decode_export(b"<Export><City>K\xF6ln</City></Export>").unwrap_err();
        assert!(matches!(err, FilterError::Xml(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_document("/nonexistent/export.xml").unwrap_err();
        assert!(matches!(err, FilterError::Io { .. }));
    }
}
