//! Rebuild an export without the customers marked for removal.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::core::{Customer, FilterError};
use crate::summary::Selection;
use crate::xml::{Document, Element, Node};

/// How the destination file name is derived from the source path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputPathMode {
    /// `<output_dir>/<source file name>`.
    #[default]
    FileName,
    /// `<output_dir>` joined with the whole source path. An absolute source
    /// path replaces the output directory.
    SourcePath,
}

/// Copy of `document` without excluded customers and their invoices.
///
/// The new root keeps the original name and attributes. Its children are all
/// retained `Customer` elements followed by all retained `Invoice` elements,
/// each group in document order.
pub fn filter_document(document: &Document, excluded: &BTreeSet<String>) -> Document {
    let mut root = document.root.shallow_clone();

    for customer in document.root.descendants("Customer") {
        let no = customer.child_text("No");
        if excluded.contains(&no) {
            tracing::debug!(customer = %no, "removing customer");
        } else {
            root.children.push(Node::Element(Element::clone(customer)));
        }
    }

    let mut removed_invoices = 0usize;
    for invoice in document.root.descendants("Invoice") {
        let owner = invoice.child_text("SellToCustomer");
        if excluded.contains(&owner) {
            tracing::debug!(
                invoice = %invoice.child_text("No"),
                customer = %owner,
                "removing invoice"
            );
            removed_invoices += 1;
        } else {
            root.children.push(Node::Element(Element::clone(invoice)));
        }
    }

    tracing::info!(
        excluded_customers = excluded.len(),
        removed_invoices,
        kept = root.children.len(),
        "filtered document"
    );
    Document::new(root)
}

/// Filter `document` by the rows selected in `selection`.
///
/// Fails when no customers were extracted, since then there is nothing a
/// selection could refer to.
pub fn filter_selection(
    document: &Document,
    customers: &[Customer],
    selection: &Selection,
) -> Result<Document, FilterError> {
    if customers.is_empty() {
        return Err(FilterError::Precondition(
            "no customer data, run processing first".into(),
        ));
    }
    let excluded = selection.excluded_ids(customers);
    Ok(filter_document(document, &excluded))
}

/// Destination of the filtered export.
pub fn output_path(
    output_dir: &Path,
    source: &Path,
    mode: OutputPathMode,
) -> Result<PathBuf, FilterError> {
    match mode {
        OutputPathMode::FileName => {
            let name = source.file_name().ok_or_else(|| {
                FilterError::Precondition(format!(
                    "source path {} has no file name",
                    source.display()
                ))
            })?;
            Ok(output_dir.join(name))
        }
        OutputPathMode::SourcePath => Ok(output_dir.join(source)),
    }
}
