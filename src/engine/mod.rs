//! Matching engine for the tickbook order book.
//!
//! ## Design
//!
//! - **Deterministic**: identical operation sequences produce identical
//!   books, trades and state roots
//! - **Integer ticks only**: no floating point anywhere in the match path
//! - **Synchronous**: no async, no blocking calls, no internal queues —
//!   callers needing parallelism shard by instrument
//! - **Price-time priority**: best price first, FIFO within a level
//!
//! ## Example
//!
//! ```
//! use tickbook::engine::MatchingEngine;
//! use tickbook::orderbook::OrderBook;
//! use tickbook::types::{Order, Side};
//!
//! let mut book = OrderBook::with_capacity(1_000);
//! let mut engine = MatchingEngine::new();
//!
//! engine.submit(&mut book, Order::new(1, Side::Sell, 10_000_000_000, 100, 0));
//! let result = engine.submit(&mut book, Order::new(2, Side::Buy, 10_000_000_000, 40, 1));
//!
//! assert!(result.fully_filled);
//! assert_eq!(book.get_order(1).unwrap().quantity, 60);
//! ```

pub mod matcher;

pub use matcher::{MatchResult, MatchingEngine};
