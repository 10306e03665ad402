//! Trade type representing an executed match between two orders.
//!
//! ## Price rule
//!
//! A trade always executes at the *resting* order's price: the incoming
//! aggressive order gets price improvement, the resting side keeps the price
//! it quoted. The engine enforces this; the type only records it.

use ssz_rs::prelude::*;

/// A single execution between a resting order and an incoming order.
///
/// The buy/sell participant ids are order ids, oriented by side rather than
/// by aggressor: `buy_order_id` is always the buying participant regardless
/// of which side was resting.
///
/// ## Example
///
/// ```
/// use tickbook::types::Trade;
///
/// let trade = Trade::new(
///     1,              // trade id
///     10_000_000_000, // price: 100.0 (scaled by 10^8)
///     500_000_000,    // quantity: 5.0
///     42,             // buy_order_id
///     43,             // sell_order_id
///     1_700_000_000,  // timestamp_ns (from the incoming order)
/// );
/// assert_eq!(trade.buy_order_id, 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Trade {
    /// Engine-assigned trade sequence number
    pub id: u64,

    /// Execution price in fixed-point ticks (always the resting level's price)
    pub price: u64,

    /// Executed quantity in fixed-point
    pub quantity: u64,

    /// Order id of the buying participant
    pub buy_order_id: u64,

    /// Order id of the selling participant
    pub sell_order_id: u64,

    /// Timestamp of the incoming order that triggered the match, nanoseconds
    pub timestamp_ns: u64,
}

impl Trade {
    /// Create a new trade record.
    pub fn new(
        id: u64,
        price: u64,
        quantity: u64,
        buy_order_id: u64,
        sell_order_id: u64,
        timestamp_ns: u64,
    ) -> Self {
        Self {
            id,
            price,
            quantity,
            buy_order_id,
            sell_order_id,
            timestamp_ns,
        }
    }

    /// Raw notional value (price * quantity) in 10^16 scale.
    ///
    /// Divide by `SCALE` once to recover a 10^8-scaled notional.
    pub fn notional_raw(&self) -> u128 {
        (self.price as u128) * (self.quantity as u128)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
