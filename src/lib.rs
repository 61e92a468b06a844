//! # rechnungsfilter
//!
//! Reads an XML export of `Customer` and `Invoice` records, sums the
//! fulfillment (`Fulfillment-Dienstleistung`) and shipping
//! (`Versandkosten EU` / `Versandkosten Non-EU`) lines per invoice and per
//! customer, and writes a copy of the export without the customers the user
//! selected.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use rechnungsfilter::prelude::*;
//!
//! let doc = parse_document(
//!     "<Export>\
//!        <Customer><No>C1</No><Name>Kunde AG</Name></Customer>\
//!        <Invoice><No>R1</No><SellToCustomer>C1</SellToCustomer>\
//!          <Line><Description>Versandkosten EU</Description><SalesPrice>10,00</SalesPrice></Line>\
//!        </Invoice>\
//!      </Export>",
//! )
//! .unwrap();
//!
//! let customers = parse_customers(&doc);
//! let totals = aggregate_invoices(&doc, &customers);
//! let mut selection = Selection::new(customers.len());
//!
//! let rows = summarize(&customers, &totals, &selection);
//! assert_eq!(format_amount(rows[0].shipping_total), "10.00");
//!
//! selection.set(0, true).unwrap();
//! let filtered = filter_selection(&doc, &customers, &selection).unwrap();
//! assert!(filtered.root.children.is_empty());
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `json` | JSON output of the customer table |
//! | `cli` (default) | `rechnungsfilter` binary, argument parsing and logging |

pub mod aggregate;
pub mod core;
pub mod extract;
pub mod filter;
pub mod session;
pub mod summary;
pub mod xml;

#[cfg(feature = "cli")]
pub mod config;

#[cfg(feature = "cli")]
pub mod logging;

/// The types and stage functions most callers need.
pub mod prelude {
    pub use crate::aggregate::aggregate_invoices;
    pub use crate::core::*;
    pub use crate::extract::parse_customers;
    pub use crate::filter::{OutputPathMode, filter_document, filter_selection, output_path};
    pub use crate::session::{Processed, Session};
    pub use crate::summary::{CustomerRow, Selection, render_table, summarize};
    pub use crate::xml::{Document, Element, Node, load_document, parse_document, to_xml_string};
}

/// The customer table as pretty-printed JSON.
#[cfg(feature = "json")]
pub fn rows_to_json(rows: &[crate::summary::CustomerRow]) -> Result<String, crate::core::FilterError> {
    serde_json::to_string_pretty(rows)
        .map_err(|e| crate::core::FilterError::Json(e.to_string()))
}
