//! Decimal text helpers.
//!
//! Money and quantities travel as decimal strings (`"8250.00"`) and are stored
//! verbatim. Parsing only happens for aggregates and computed line totals.
//!
//! Accepted amounts stay below [`MAX_AMOUNT`] and quantities below
//! [`MAX_QUANTITY`], so a line total always fits in a `Decimal`. Arithmetic
//! still saturates at `Decimal::MAX` rather than panicking.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::errors::Violations;

/// Exclusive upper bound for monetary values (10^15).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Exclusive upper bound for item quantities (10^9).
pub const MAX_QUANTITY: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Parse a monetary string, treating empty or unparsable input as zero.
pub fn parse_or_zero(value: &str) -> Decimal {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(trimmed).unwrap_or(Decimal::ZERO)
}

/// Render with exactly two decimal places.
pub fn format(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

/// `quantity × unit_price`, rounded to cents.
pub fn line_total(quantity: &str, unit_price: &str) -> String {
    format(parse_or_zero(quantity).saturating_mul(parse_or_zero(unit_price)))
}

/// Sum of a set of monetary strings, missing values counting as zero.
pub fn sum<'a, I>(values: I) -> Decimal
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .map(parse_or_zero)
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

pub(crate) fn check_amount(v: &mut Violations, field: &str, value: &str) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return;
    }
    match Decimal::from_str(trimmed) {
        Ok(d) if d.is_sign_negative() => v.push(field, "must not be negative"),
        Ok(d) if d >= MAX_AMOUNT => v.push(field, format!("must be less than {MAX_AMOUNT}")),
        Ok(_) => {}
        Err(_) => v.push(field, "must be a decimal number"),
    }
}

pub(crate) fn check_quantity(v: &mut Violations, field: &str, value: &str) {
    match Decimal::from_str(value.trim()) {
        Ok(d) if d >= MAX_QUANTITY => v.push(field, format!("must be less than {MAX_QUANTITY}")),
        Ok(d) if d > Decimal::ZERO => {}
        Ok(_) => v.push(field, "must be greater than zero"),
        Err(_) => v.push(field, "must be a decimal number"),
    }
}
