//! # Item Formatter
//!
//! Builds the one-line display string for an item.
//!
//! ```text
//!   name     code             qty          expiration (optional)
//!   ────     ────             ───          ─────────────────────
//!   Milk | Code: 3017620422003 | Quantité: 2 | Expiration: 07/03/2025
//! ```
//!
//! No parser exists for this string: items are stored as
//! records and only rendered here.

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult};
use crate::types::Quantity;

/// Display format for expiration dates (zero-padded day/month, 4-digit year).
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Alternate input format accepted by [`parse_date`].
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats a date as `dd/mm/yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses `dd/mm/yyyy`, falling back to ISO `yyyy-mm-dd`.
pub fn parse_date(input: &str) -> CoreResult<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(input, ISO_DATE_FORMAT))
        .map_err(|_| CoreError::InvalidDate(input.to_string()))
}

/// Formats an item.
///
/// The ` | Expiration: ...` segment is left out entirely when
/// `expiration` is `None`.
pub fn format_item(
    name: &str,
    code: &str,
    quantity: Quantity,
    expiration: Option<NaiveDate>,
) -> String {
    let mut entry = format!("{} | Code: {} | Quantité: {}", name, code, quantity);
    if let Some(date) = expiration {
        entry.push_str(" | Expiration: ");
        entry.push_str(&format_date(date));
    }
    entry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_without_expiration() {
        let entry = format_item("Bread", "333", Quantity::ONE, None);
        assert_eq!(entry, "Bread | Code: 333 | Quantité: 1");
        assert!(!entry.contains("Expiration"));
    }

    #[test]
    fn test_format_with_expiration_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let entry = format_item("Milk", "111", Quantity::new(3).unwrap(), Some(date));
        assert_eq!(entry, "Milk | Code: 111 | Quantité: 3 | Expiration: 05/01/2025");
    }

    #[test]
    fn test_format_date_pads_year() {
        let date = NaiveDate::from_ymd_opt(987, 12, 31).unwrap();
        assert_eq!(format_date(date), "31/12/0987");
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(parse_date("07/03/2025").unwrap(), expected);
        assert_eq!(parse_date(" 2025-03-07 ").unwrap(), expected);
        assert!(matches!(parse_date("31/02/2025"), Err(CoreError::InvalidDate(_))));
        assert!(parse_date("tomorrow").is_err());
    }
}
