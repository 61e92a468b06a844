//! Customer records from an export.

use crate::core::Customer;
use crate::xml::{Document, Element};

/// One [`Customer`] per `Customer` element anywhere below the root, in
/// document order. Missing fields are `""`; no element is ever rejected.
pub fn parse_customers(document: &Document) -> Vec<Customer> {
    let customers: Vec<Customer> = document
        .root
        .descendants("Customer")
        .into_iter()
        .map(customer_from_element)
        .collect();
    tracing::info!(count = customers.len(), "extracted customers");
    customers
}

fn customer_from_element(e: &Element) -> Customer {
    Customer {
        no: e.child_text("No"),
        name: e.child_text("Name"),
        address: e.child_text("Address"),
        post_code: e.child_text("PostCode"),
        city: e.child_text("City"),
        payment_method_code: e.child_text("PaymentMethodCode"),
        payment_terms_code: e.child_text("PaymentTermsCode"),
    }
}
