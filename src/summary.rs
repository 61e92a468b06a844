//! Per-customer rows for display, and the removal selection behind them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::{Customer, FilterError, InvoiceTotal, format_amount};

/// Column headers of the customer table.
pub const HEADERS: [&str; 6] = [
    "Select",
    "Customer No",
    "Name",
    "Invoice No",
    "Fulfillment-Dienstleistung",
    "Versandkosten",
];

/// One customer with the sums of all its invoice rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRow {
    /// Marked for removal from the filtered output.
    pub selected: bool,
    pub customer_no: String,
    pub name: String,
    /// Distinct invoice numbers of this customer, joined with `", "`.
    pub invoice_nos: String,
    pub fulfillment_total: Decimal,
    pub shipping_total: Decimal,
}

/// Removal flags, one per customer row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    flags: Vec<bool>,
}

impl Selection {
    /// `len` unselected rows.
    pub fn new(len: usize) -> Self {
        Self {
            flags: vec![false; len],
        }
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    pub fn set(&mut self, index: usize, selected: bool) -> Result<(), FilterError> {
        let len = self.flags.len();
        let flag = self.flags.get_mut(index).ok_or_else(|| {
            FilterError::Selection(format!("row {index} out of range ({len} rows)"))
        })?;
        *flag = selected;
        Ok(())
    }

    /// Flip row `index` and return its new state.
    pub fn toggle(&mut self, index: usize) -> Result<bool, FilterError> {
        let next = !self.is_selected(index);
        self.set(index, next)?;
        Ok(next)
    }

    /// Select every row whose customer number is in `ids`.
    ///
    /// Returns the ids that matched no row.
    pub fn select_ids<'a, I>(&mut self, customers: &[Customer], ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut unmatched = Vec::new();
        for id in ids {
            let mut matched = false;
            for (index, customer) in customers.iter().enumerate() {
                if customer.no == id {
                    if let Some(flag) = self.flags.get_mut(index) {
                        *flag = true;
                        matched = true;
                    }
                }
            }
            if !matched {
                tracing::warn!(customer = id, "no customer row with this number");
                unmatched.push(id.to_string());
            }
        }
        unmatched
    }

    /// Customer numbers of all selected rows.
    pub fn excluded_ids(&self, customers: &[Customer]) -> BTreeSet<String> {
        customers
            .iter()
            .enumerate()
            .filter(|(index, _)| self.is_selected(*index))
            .map(|(_, c)| c.no.clone())
            .collect()
    }
}

/// Project customers and invoice totals into display rows.
///
/// Totals stay at full precision; use [`format_amount`] for display.
pub fn summarize(
    customers: &[Customer],
    totals: &[InvoiceTotal],
    selection: &Selection,
) -> Vec<CustomerRow> {
    customers
        .iter()
        .enumerate()
        .map(|(index, customer)| {
            let mut invoice_nos: Vec<&str> = Vec::new();
            let mut fulfillment_total = Decimal::ZERO;
            let mut shipping_total = Decimal::ZERO;
            for t in totals.iter().filter(|t| t.customer_no == customer.no) {
                if !invoice_nos.contains(&t.invoice_no.as_str()) {
                    invoice_nos.push(&t.invoice_no);
                }
                fulfillment_total += t.fulfillment_total;
                shipping_total += t.shipping_total;
            }
            CustomerRow {
                selected: selection.is_selected(index),
                customer_no: customer.no.clone(),
                name: customer.name.clone(),
                invoice_nos: invoice_nos.join(", "),
                fulfillment_total,
                shipping_total,
            }
        })
        .collect()
}

/// Plain-text table of `rows`, one line per customer under a header line.
pub fn render_table(rows: &[CustomerRow]) -> String {
    let cells: Vec<[String; 6]> = rows
        .iter()
        .map(|r| {
            [
                if r.selected { "[x]" } else { "[ ]" }.to_string(),
                r.customer_no.clone(),
                r.name.clone(),
                r.invoice_nos.clone(),
                format_amount(r.fulfillment_total),
                format_amount(r.shipping_total),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(String::from), &widths);
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(col, (cell, &width))| {
            // Amount columns are right-aligned.
            if col >= 4 {
                format!("{cell:>width$}")
            } else {
                format!("{cell:<width$}")
            }
        })
        .collect();
    out.push_str(line.join(" | ").trim_end());
    out.push('\n');
}
