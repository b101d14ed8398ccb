use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::error::CoercionFailure;

/// Largest amount accepted from user input: 999,999,999,999.99.
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(276447231, 23283, 0, false, 2);

/// Parse a raw amount string into a decimal.
/// Accepts plain (`"12.50"`, `"-3"`) and scientific (`"1.5e2"`) notation,
/// ignoring surrounding whitespace.
pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, CoercionFailure> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoercionFailure { raw: raw.into() });
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| CoercionFailure { raw: raw.into() })
}

/// Round to whole cents, halves away from zero.
pub(crate) fn round_cents(val: Decimal) -> Decimal {
    let mut rounded = val.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
