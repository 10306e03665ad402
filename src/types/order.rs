//! Order types for the tickbook engine.
//!
//! ## Representation
//!
//! Prices and quantities are fixed-point `u64` scaled by 10^8 (see
//! [`crate::types::price::SCALE`]). The side is stored as a raw `u8` so the
//! struct stays a fixed-size SSZ container with deterministic encoding.
//!
//! ## Identity
//!
//! An order is identified solely by `id`. The caller guarantees uniqueness
//! across the engine's lifetime; the engine rejects collisions by dropping
//! the duplicate submission.

use ssz_rs::prelude::*;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy (bid) or Sell (ask).
///
/// Encoded as u8 for SSZ compatibility: Buy = 0, Sell = 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Buy order (bid)
    #[default]
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }

    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// True for [`Side::Buy`]
    #[inline]
    pub fn is_buy(self) -> bool {
        matches!(self, Side::Buy)
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A limit order as seen by the caller.
///
/// `quantity` is the *remaining* quantity: it is decremented as the order is
/// matched, and an order with `quantity == 0` is terminal.
///
/// `timestamp_ns` is the caller-supplied entry timestamp in nanoseconds. It
/// is stored and reported but never consulted for priority — priority within
/// a level is by arrival order into the level.
///
/// ## Example
///
/// ```
/// use tickbook::types::{Order, Side};
///
/// // Buy 10.0 units at 100.0 (both scaled by 10^8)
/// let order = Order::new(1, Side::Buy, 10_000_000_000, 1_000_000_000, 1_700_000_000_000_000_000);
/// assert_eq!(order.side(), Side::Buy);
/// assert!(!order.is_filled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Order {
    /// Unique order identifier (caller-allocated)
    pub id: u64,

    /// Order side as u8 (0=Buy, 1=Sell), raw for SSZ
    pub side_raw: u8,

    /// Limit price in fixed-point ticks (scaled by 10^8)
    pub price: u64,

    /// Remaining quantity in fixed-point (scaled by 10^8)
    pub quantity: u64,

    /// Entry timestamp in nanoseconds, caller-supplied
    pub timestamp_ns: u64,
}

impl Order {
    /// Create a new limit order with its full quantity remaining.
    pub fn new(id: u64, side: Side, price: u64, quantity: u64, timestamp_ns: u64) -> Self {
        Self {
            id,
            side_raw: side.to_u8(),
            price,
            quantity,
            timestamp_ns,
        }
    }

    /// Get the order side
    #[inline]
    pub fn side(&self) -> Side {
        Side::from_u8(self.side_raw).unwrap_or(Side::Buy)
    }

    /// Check whether the order has no remaining quantity
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.quantity == 0
    }

    /// Consume up to `fill_qty` of the remaining quantity.
    ///
    /// Returns the quantity actually consumed, which is capped at what the
    /// order has left.
    #[inline]
    pub fn fill(&mut self, fill_qty: u64) -> u64 {
        let consumed = fill_qty.min(self.quantity);
        self.quantity -= consumed;
        consumed
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
