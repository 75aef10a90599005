//! Parsing of user-entered money and date strings.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Calendar date format accepted from forms and sent to the backend.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest amount accepted, in cents (`999999999999.99`).
const MAX_AMOUNT_CENTS: i64 = 99_999_999_999_999;

/// Largest amount accepted for a single expense or receipt.
pub fn max_amount() -> Decimal {
    Decimal::new(MAX_AMOUNT_CENTS, 2)
}

/// Parse a positive monetary amount such as `"12.50"`.
///
/// Returns a short reason on failure, suitable for a field error.
pub fn parse_amount(raw: &str) -> Result<Decimal, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("is required");
    }
    let amount = Decimal::from_str(raw).map_err(|_| "must be a decimal number")?;
    if amount <= Decimal::ZERO {
        return Err("must be greater than zero");
    }
    if amount > max_amount() {
        return Err("must not exceed 999999999999.99");
    }
    Ok(amount)
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("is required");
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| "must be a valid YYYY-MM-DD date")
}
