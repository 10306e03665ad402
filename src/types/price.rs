//! Fixed-point price and quantity conversions.
//!
//! All prices and quantities inside the engine are `u64` ticks scaled by
//! 10^8. The book's maps key on these integers directly, so two prices that
//! should land on the same level always compare equal — binary floating
//! point never touches a map key.
//!
//! `rust_decimal` handles the conversions at the crate edge (parsing caller
//! strings, rendering snapshots, snapping to a tick grid). The hot path is
//! pure integer arithmetic.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use thiserror::Error;

/// Scaling factor for fixed-point arithmetic: 10^8.
///
/// Eight decimal places of precision; values up to u64::MAX / SCALE
/// (~184 billion) are representable.
pub const SCALE: u64 = 100_000_000;

/// Conversion failures at the crate edge.
///
/// The engine itself never produces these; they can only arise while turning
/// caller-supplied decimal input into ticks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// Input was not a parseable decimal number
    #[error("unparseable decimal: {0:?}")]
    Unparseable(String),

    /// Negative prices and quantities have no tick representation
    #[error("negative value: {0}")]
    Negative(Decimal),

    /// Value exceeds u64::MAX / SCALE after scaling
    #[error("value out of tick range: {0}")]
    OutOfRange(Decimal),
}

// ============================================================================
// Conversion Functions
// ============================================================================

/// Parse a decimal string into fixed-point ticks.
///
/// # Example
///
/// ```
/// use tickbook::types::price::to_fixed;
///
/// assert_eq!(to_fixed("100.5").unwrap(), 10_050_000_000);
/// assert_eq!(to_fixed("0.00000001").unwrap(), 1);
/// assert!(to_fixed("-1").is_err());
/// ```
pub fn to_fixed(s: &str) -> Result<u64, PriceError> {
    let decimal =
        Decimal::from_str(s).map_err(|_| PriceError::Unparseable(s.to_string()))?;
    decimal_to_fixed(decimal)
}

/// Convert a [`Decimal`] into fixed-point ticks.
pub fn decimal_to_fixed(d: Decimal) -> Result<u64, PriceError> {
    if d.is_sign_negative() && !d.is_zero() {
        return Err(PriceError::Negative(d));
    }

    let scaled = d
        .checked_mul(Decimal::from(SCALE))
        .ok_or(PriceError::OutOfRange(d))?;
    scaled.round_dp(0).to_u64().ok_or(PriceError::OutOfRange(d))
}

/// Convert fixed-point ticks back into a [`Decimal`].
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Render fixed-point ticks with two decimal places, the venue's display
/// precision for prices.
///
/// # Example
///
/// ```
/// use tickbook::types::price::from_fixed;
///
/// assert_eq!(from_fixed(10_050_000_000), "100.50");
/// ```
pub fn from_fixed(value: u64) -> String {
    format!("{:.2}", fixed_to_decimal(value))
}

/// Snap a tick value onto the grid defined by `precision` (e.g. 0.01).
///
/// Advisory helper for callers: the engine stores whatever ticks it is
/// given and never rounds on the caller's behalf.
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use tickbook::types::price::snap_to_tick;
///
/// // 100.006 snapped to a 0.01 grid
/// assert_eq!(snap_to_tick(10_000_600_000, Decimal::new(1, 2)).unwrap(), 10_001_000_000);
/// ```
pub fn snap_to_tick(value: u64, precision: Decimal) -> Result<u64, PriceError> {
    if precision <= Decimal::ZERO {
        return Err(PriceError::OutOfRange(precision));
    }

    let d = fixed_to_decimal(value);
    let steps = (d / precision).round();
    let snapped = steps
        .checked_mul(precision)
        .ok_or(PriceError::OutOfRange(d))?;
    decimal_to_fixed(snapped)
}

// ============================================================================
// Unit Tests
// ============================================================================
