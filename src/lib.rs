//! # tickbook
//!
//! Low-latency single-instrument limit order book for trading backends.
//!
//! ## Architecture
//!
//! - **Types**: `Order`, `Trade`, fixed-point tick conversions
//! - **OrderBook**: slab-backed resting state with price-ordered sides and
//!   an O(1) order-id index
//! - **Engine**: deterministic price/time-priority matching over the book
//!
//! ## Design principles
//!
//! 1. **Determinism**: identical inputs produce identical books and trades,
//!    verifiable via SSZ + SHA-256 state roots
//! 2. **No floating point**: prices and quantities are u64 ticks scaled by
//!    10^8; `f64` never keys a map
//! 3. **Bounded allocation**: order nodes live in a slab whose freed slots
//!    are recycled; steady state allocates nothing
//! 4. **Synchronous hot path**: no async, no I/O, no locks — one engine per
//!    instrument shard

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Side, Trade, fixed-point price utilities
pub mod types;

/// Order book: slab pool, price levels, bid/ask maps, order index
pub mod orderbook;

/// Matching engine: submit/cancel/amend with price-time priority
pub mod engine;

/// Engine configuration
pub mod config;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::BookConfig;
pub use engine::{MatchResult, MatchingEngine};
pub use orderbook::{DepthLevel, OrderBook, OrderNode, PriceLevel};
pub use types::{Order, Side, Trade};
