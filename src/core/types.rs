use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Line description that counts toward [`InvoiceTotal::fulfillment_total`].
pub const FULFILLMENT_DESCRIPTION: &str = "Fulfillment-Dienstleistung";

/// Line descriptions that count toward [`InvoiceTotal::shipping_total`].
pub const SHIPPING_DESCRIPTIONS: [&str; 2] = ["Versandkosten EU", "Versandkosten Non-EU"];

/// A `Customer` element of the export.
///
/// Every field mirrors a direct child element of the same XML name and is
/// `""` when that child is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// `No`: customer number, the key invoices refer to.
    pub no: String,
    /// `Name`.
    pub name: String,
    /// `Address`: street line.
    pub address: String,
    /// `PostCode`.
    pub post_code: String,
    /// `City`.
    pub city: String,
    /// `PaymentMethodCode`.
    pub payment_method_code: String,
    /// `PaymentTermsCode`.
    pub payment_terms_code: String,
}

/// Fulfillment and shipping sums of one `Invoice` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotal {
    /// `No` of the invoice.
    pub invoice_no: String,
    /// `SellToCustomer` of the invoice (the DEB number).
    pub customer_no: String,
    /// Name of the owning customer, `""` when no customer matches.
    pub customer_name: String,
    /// Sum of `Fulfillment-Dienstleistung` line prices.
    pub fulfillment_total: Decimal,
    /// Sum of `Versandkosten EU` / `Versandkosten Non-EU` line prices.
    pub shipping_total: Decimal,
}

impl InvoiceTotal {
    pub fn new(
        invoice_no: impl Into<String>,
        customer_no: impl Into<String>,
        customer_name: impl Into<String>,
    ) -> Self {
        Self {
            invoice_no: invoice_no.into(),
            customer_no: customer_no.into(),
            customer_name: customer_name.into(),
            fulfillment_total: Decimal::ZERO,
            shipping_total: Decimal::ZERO,
        }
    }

    /// Add a line price to the accumulator its description selects.
    ///
    /// Returns `false` when the description matches neither category.
    pub fn add_line(&mut self, description: &str, price: Decimal) -> bool {
        match LineCategory::of(description) {
            Some(LineCategory::Fulfillment) => self.fulfillment_total += price,
            Some(LineCategory::Shipping) => self.shipping_total += price,
            None => return false,
        }
        true
    }
}

/// Category of an invoice line, decided by its exact description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCategory {
    Fulfillment,
    Shipping,
}

impl LineCategory {
    pub fn of(description: &str) -> Option<Self> {
        if description == FULFILLMENT_DESCRIPTION {
            Some(Self::Fulfillment)
        } else if SHIPPING_DESCRIPTIONS.contains(&description) {
            Some(Self::Shipping)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_match_exactly() {
        assert_eq!(
            LineCategory::of("Fulfillment-Dienstleistung"),
            Some(LineCategory::Fulfillment)
        );
        assert_eq!(LineCategory::of("Versandkosten EU"), Some(LineCategory::Shipping));
        assert_eq!(
            LineCategory::of("Versandkosten Non-EU"),
            Some(LineCategory::Shipping)
        );
        assert_eq!(LineCategory::of("fulfillment-dienstleistung"), None);
        assert_eq!(LineCategory::of("Versandkosten EU "), None);
        assert_eq!(LineCategory::of(""), None);
    }
}
