//! Helpers around `BigDecimal` for the economy counters.
//!
//! The five big quantities (balance, lifetime production, click yield, APS,
//! APS boost) are `BigDecimal`; prices and rates stay `f64`. Everything that
//! crosses that boundary goes through here.

use bigdecimal::{BigDecimal, FromPrimitive, RoundingMode};

/// Convert an `f64` to a `BigDecimal`. `None` for NaN/infinite input, which
/// callers treat as "unaffordable" rather than an error.
pub fn big(value: f64) -> Option<BigDecimal> {
    BigDecimal::from_f64(value)
}

/// The click-yield rounding rule: multiply by 100, ceiling, divide by 100.
/// Always rounds UP to the nearest hundredth, never down.
pub fn ceil_hundredths(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(2, RoundingMode::Ceiling)
}

/// `true` when `balance` covers `price` (boundary inclusive). A non-finite
/// price never matches.
pub fn affordable(balance: &BigDecimal, price: f64) -> bool {
    match big(price) {
        Some(p) => *balance >= p,
        None => false,
    }
}

/// Integer part of a counter, for the headline display.
pub fn whole(value: &BigDecimal) -> String {
    value.with_scale_round(0, RoundingMode::Down).to_string()
}

/// Truncate to two fractional digits, for the per-second display.
pub fn trunc_hundredths(value: &BigDecimal) -> String {
    value.with_scale_round(2, RoundingMode::Down).to_string()
}
