use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Rejected user input. Always recovered locally: the operation that hit it
/// prints the message and returns to the menu without touching the ledger.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid date {0:?}. Please use YYYY-MM-DD format.")]
    Date(String),

    #[error("Invalid amount {0:?}. Please enter a plain number, e.g. 45.75.")]
    Amount(String),
}

/// Parses a date strictly as `YYYY-MM-DD`: four-digit year, two-digit month,
/// two-digit day, `-` separators, valid calendar date. Chrono alone accepts
/// variable-width fields like `2024-3-15`, so the shape is checked first.
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let bytes = input.as_bytes();
    let well_shaped = bytes.len() == 10
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { *b == b'-' } else { b.is_ascii_digit() });
    if !well_shaped {
        return Err(ValidationError::Date(input.to_string()));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| ValidationError::Date(input.to_string()))
}

/// Parses an amount as a plain base-10 number with an optional leading sign.
/// No currency symbols, no unit.
pub fn parse_amount(input: &str) -> Result<Decimal, ValidationError> {
    Decimal::from_str_exact(input).map_err(|_| ValidationError::Amount(input.to_string()))
}
