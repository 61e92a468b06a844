//! Per-invoice fulfillment and shipping totals.

use std::collections::HashSet;

use crate::core::{Customer, InvoiceTotal, parse_price};
use crate::xml::{Document, Element};

/// Aggregate every `Invoice` element of `document`.
///
/// Invoice numbers are visited in order of first appearance. Each element
/// bearing a number yields its own row, so duplicated numbers produce
/// several rows with the same `invoice_no`. Invoices without a `No` child
/// are not aggregated.
pub fn aggregate_invoices(document: &Document, customers: &[Customer]) -> Vec<InvoiceTotal> {
    let mut invoices = document.root.descendants("Invoice");
    let found = invoices.len();
    invoices.retain(|inv| inv.child("No").is_some());
    if invoices.len() < found {
        tracing::debug!(
            skipped = found - invoices.len(),
            "invoices without a number are not aggregated"
        );
    }

    let mut seen = HashSet::new();
    let invoice_nos: Vec<String> = invoices
        .iter()
        .map(|inv| inv.child_text("No"))
        .filter(|no| seen.insert(no.clone()))
        .collect();

    let mut totals = Vec::with_capacity(invoices.len());
    for invoice_no in &invoice_nos {
        let matching = invoices
            .iter()
            .filter(|inv| inv.child_text("No") == *invoice_no);
        for invoice in matching {
            totals.push(invoice_total(invoice_no, invoice, customers));
        }
    }

    if totals.len() > invoice_nos.len() {
        tracing::warn!(
            rows = totals.len(),
            distinct = invoice_nos.len(),
            "export contains duplicate invoice numbers"
        );
    }
    tracing::info!(invoices = totals.len(), "aggregated invoice totals");
    totals
}

fn invoice_total(invoice_no: &str, invoice: &Element, customers: &[Customer]) -> InvoiceTotal {
    let customer_no = invoice.child_text("SellToCustomer");
    let customer_name = customers
        .iter()
        .find(|c| c.no == customer_no)
        .map(|c| c.name.clone())
        .unwrap_or_default();

    let mut total = InvoiceTotal::new(invoice_no, customer_no, customer_name);
    for line in invoice.descendants("Line") {
        let description = line.child_text("Description");
        let price = parse_price(&line.child_text_or("SalesPrice", "0"));
        total.add_line(&description, price);
    }
    total
}
