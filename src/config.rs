//! Engine configuration.

use rust_decimal::Decimal;

/// Runtime configuration for the order book engine.
///
/// `price_precision` is advisory: it names the tick grid callers are
/// expected to quote on (see [`crate::types::price::snap_to_tick`]), but the
/// engine never rounds a caller's price on its behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookConfig {
    /// Emit one structured log event per trade (`price, qty, buy_id, sell_id`)
    pub verbose_logging: bool,

    /// Depth used by callers that take snapshots without an explicit depth
    pub default_snapshot_depth: usize,

    /// Advisory tick size for caller-side price normalization
    pub price_precision: Decimal,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            verbose_logging: true,
            default_snapshot_depth: 10,
            price_precision: Decimal::new(1, 2), // 0.01
        }
    }
}

impl BookConfig {
    /// Create a configuration with every field explicit.
    pub fn new(verbose_logging: bool, default_snapshot_depth: usize, price_precision: Decimal) -> Self {
        Self {
            verbose_logging,
            default_snapshot_depth,
            price_precision,
        }
    }
}
