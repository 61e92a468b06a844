//! Owned XML document tree with quick-xml based parsing and serialization.
//!
//! The export format has no namespaces and no schema, so the tree keeps
//! only element names, attributes and text.

mod document;
mod parse;
mod write;

pub use document::{Document, Element, Node};
pub use parse::{load_document, parse_document};
pub use write::{XmlWriter, to_xml_string, write_document};
