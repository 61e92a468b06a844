//! German-locale amounts: `.` groups thousands, `,` separates decimals.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a `SalesPrice` such as `"1.234,56"`.
///
/// Every `.` is dropped and `,` becomes the decimal point. Anything that is
/// still not a number afterwards counts as zero, as does a number too large
/// for [`Decimal`].
pub fn parse_price(text: &str) -> Decimal {
    let normalized = text.trim().replace('.', "").replace(',', ".");
    match Decimal::from_str(&normalized) {
        Ok(d) => d,
        Err(e) if is_plain_number(&normalized) => {
            tracing::warn!(price = text, error = %e, "price out of decimal range counted as zero");
            Decimal::ZERO
        }
        Err(e) => {
            tracing::debug!(price = text, error = %e, "unparseable price counted as zero");
            Decimal::ZERO
        }
    }
}

/// Optional sign, digits, and at most one `.` followed by digits.
fn is_plain_number(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    let (int, frac) = digits.split_once('.').unwrap_or((digits, ""));
    !int.is_empty()
        && int.bytes().all(|b| b.is_ascii_digit())
        && frac.bytes().all(|b| b.is_ascii_digit())
}

/// Format an amount with two decimal places for display (`20.00`).
pub fn format_amount(d: Decimal) -> String {
    let scaled = d.round_dp(2);
    format!("{:.2}", scaled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_price_german_format() {
        assert_eq!(parse_price("1.234,56"), Decimal::new(123456, 2));
        assert_eq!(parse_price("10,00"), Decimal::new(10, 0));
        assert_eq!(parse_price("1.000.000"), Decimal::new(1_000_000, 0));
        assert_eq!(parse_price("-4,5"), Decimal::new(-45, 1));
        assert_eq!(parse_price(" 7,25 "), Decimal::new(725, 2));
    }

    #[test]
    fn parse_price_garbage_is_zero() {
        assert_eq!(parse_price("abc"), Decimal::ZERO);
        assert_eq!(parse_price(""), Decimal::ZERO);
        assert_eq!(parse_price("1,2,3"), Decimal::ZERO);
    }

    #[test]
    fn overflowing_price_is_zero() {
        let huge = "99999999999999999999999999999,00";
        assert!(is_plain_number(&huge.replace(',', ".")));
        assert_eq!(parse_price(huge), Decimal::ZERO);
    }

    #[test]
    fn plain_number_shape() {
        assert!(is_plain_number("1234.56"));
        assert!(is_plain_number("-4"));
        assert!(!is_plain_number("abc"));
        assert!(!is_plain_number("1.2.3"));
        assert!(!is_plain_number(".5"));
        assert!(!is_plain_number(""));
    }

    #[test]
    fn format_amount_two_places() {
        assert_eq!(format_amount(Decimal::new(20, 0)), "20.00");
        assert_eq!(format_amount(Decimal::new(49_9, 1)), "49.90");
        assert_eq!(format_amount(Decimal::new(123456, 3)), "123.46");
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
    }
}
