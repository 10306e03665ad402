//! Matching engine: the public submit/cancel/amend surface.
//!
//! ## Matching rules
//!
//! - An incoming buy crosses while its price >= the best ask; an incoming
//!   sell crosses while its price <= the best bid. Equal prices cross.
//! - Resting liquidity is consumed best level first, head of queue first.
//! - Trades execute at the resting level's price.
//! - Whatever survives matching rests in the book; zero survives as nothing.
//!
//! ## Event ordering
//!
//! Within one submit, trades are emitted in consumption order: head of the
//! best level, then the next head after each unlink, then the next level.
//! Across operations the caller imposes order — the engine is synchronous
//! and single-threaded.

use tracing::{debug, info};

use crate::config::BookConfig;
use crate::orderbook::OrderBook;
use crate::types::{Order, Side, Trade};

/// Outcome of one order submission.
#[derive(Debug, Clone, Default)]
pub struct MatchResult {
    /// Id of the submitted order
    pub order_id: u64,

    /// Trades executed, in consumption order
    pub trades: Vec<Trade>,

    /// Quantity left after matching; zero means nothing rested
    pub remaining: u64,

    /// True when matching consumed the entire submitted quantity
    /// (vacuously true for a zero-quantity submission)
    pub fully_filled: bool,

    /// True when the id already rested in the book and the submission was
    /// dropped without matching
    pub duplicate: bool,
}

impl MatchResult {
    fn duplicate(order_id: u64, remaining: u64) -> Self {
        Self {
            order_id,
            trades: Vec::new(),
            remaining,
            fully_filled: false,
            duplicate: true,
        }
    }
}

/// Deterministic price/time-priority matching engine over an [`OrderBook`].
///
/// The engine owns the trade sequence counter and the configuration; the
/// book owns all resting state. One engine drives one book.
///
/// ## Example
///
/// ```
/// use tickbook::engine::MatchingEngine;
/// use tickbook::orderbook::OrderBook;
/// use tickbook::types::{Order, Side};
///
/// let mut book = OrderBook::with_capacity(1_000);
/// let mut engine = MatchingEngine::new();
///
/// engine.submit(&mut book, Order::new(1, Side::Sell, 10_000_000_000, 100, 0));
/// let result = engine.submit(&mut book, Order::new(2, Side::Buy, 10_000_000_000, 100, 1));
///
/// assert!(result.fully_filled);
/// assert_eq!(result.trades.len(), 1);
/// assert!(book.is_empty());
/// ```
#[derive(Debug)]
pub struct MatchingEngine {
    config: BookConfig,
    next_trade_id: u64,
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchingEngine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(BookConfig::default())
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(config: BookConfig) -> Self {
        Self {
            config,
            next_trade_id: 1,
        }
    }

    /// Current configuration
    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    /// Toggle per-trade logging at runtime
    pub fn set_verbose(&mut self, enabled: bool) {
        self.config.verbose_logging = enabled;
    }

    // ========================================================================
    // Public operations
    // ========================================================================

    /// Submit an order: match it against the opposite side, then rest any
    /// residue.
    ///
    /// A submission whose id already rests in the book is dropped before
    /// matching — the book is left untouched and the result carries
    /// `duplicate = true`.
    pub fn submit(&mut self, book: &mut OrderBook, mut order: Order) -> MatchResult {
        let order_id = order.id;

        if book.contains_order(order_id) {
            debug!(order_id, "duplicate order id, submission dropped");
            return MatchResult::duplicate(order_id, order.quantity);
        }

        let submitted = order.quantity;
        let mut trades = Vec::new();
        self.match_incoming(book, &mut order, &mut trades);

        let remaining = order.quantity;
        if remaining > 0 {
            book.rest_order(order)
                .expect("id verified absent before matching");
        }

        debug!(
            order_id,
            submitted,
            remaining,
            trades = trades.len(),
            "submit"
        );

        MatchResult {
            order_id,
            trades,
            remaining,
            fully_filled: remaining == 0,
            duplicate: false,
        }
    }

    /// Cancel a resting order by id. False when the id is unknown; the book
    /// is untouched in that case.
    pub fn cancel(&mut self, book: &mut OrderBook, order_id: u64) -> bool {
        let cancelled = book.cancel_order(order_id).is_some();
        debug!(order_id, cancelled, "cancel");
        cancelled
    }

    /// Amend a resting order. False when the id is unknown.
    ///
    /// - Same price, same quantity: no-op.
    /// - Same price, new quantity: adjusted in place; the order keeps its
    ///   queue position whether the quantity grows or shrinks. A new
    ///   quantity of zero is a cancel (a zero-quantity rest would leave an
    ///   empty level reachable).
    /// - New price: cancel plus resubmit under the same id, side and entry
    ///   timestamp. Time priority is lost and the replacement may cross —
    ///   amending into the opposite side is a new aggressive order.
    pub fn amend(
        &mut self,
        book: &mut OrderBook,
        order_id: u64,
        new_price: u64,
        new_quantity: u64,
    ) -> bool {
        let Some(existing) = book.get_order(order_id) else {
            debug!(order_id, "amend of unknown order id");
            return false;
        };

        let old_price = existing.price;
        let old_quantity = existing.quantity;
        let side = existing.side();
        let timestamp_ns = existing.timestamp_ns;

        if new_price == old_price {
            if new_quantity == old_quantity {
                return true;
            }
            if new_quantity == 0 {
                book.cancel_order(order_id);
                debug!(order_id, "amend to zero quantity, cancelled");
                return true;
            }
            book.amend_quantity(order_id, new_quantity);
            debug!(order_id, old_quantity, new_quantity, "amend in place");
            return true;
        }

        book.cancel_order(order_id)
            .expect("indexed order must cancel");
        let replacement = Order::new(order_id, side, new_price, new_quantity, timestamp_ns);
        debug!(order_id, old_price, new_price, "amend with price move, resubmitting");
        self.submit(book, replacement);
        true
    }

    // ========================================================================
    // Matching loop
    // ========================================================================

    /// Cross `incoming` against the opposite side while the price condition
    /// holds, appending executions to `trades`.
    fn match_incoming(&mut self, book: &mut OrderBook, incoming: &mut Order, trades: &mut Vec<Trade>) {
        let incoming_side = incoming.side();
        let resting_side = incoming_side.opposite();

        while incoming.quantity > 0 {
            let (level_price, head_key) = match book.best_level(resting_side) {
                Some(level) => (
                    level.price,
                    level.peek_head().expect("non-empty level without a head"),
                ),
                None => break,
            };

            let crosses = match incoming_side {
                Side::Buy => incoming.price >= level_price,
                Side::Sell => incoming.price <= level_price,
            };
            if !crosses {
                break;
            }

            // Read the resting order's fields before it can be destroyed.
            let (resting_id, resting_quantity) = {
                let resting = book.order_at(head_key).expect("head key not live");
                (resting.id, resting.quantity)
            };

            let fill_quantity = incoming.quantity.min(resting_quantity);
            let (buy_id, sell_id) = match incoming_side {
                Side::Buy => (incoming.id, resting_id),
                Side::Sell => (resting_id, incoming.id),
            };

            let trade = Trade::new(
                self.next_trade_id(),
                level_price,
                fill_quantity,
                buy_id,
                sell_id,
                incoming.timestamp_ns,
            );

            incoming.quantity -= fill_quantity;

            if fill_quantity == resting_quantity {
                // Full fill: unlink, unindex, destroy; erases the level if
                // this drained it
                book.remove_order(head_key);
            } else {
                book.fill_resting(head_key, fill_quantity);
            }

            self.emit_trade(&trade);
            trades.push(trade);
        }
    }

    #[inline]
    fn next_trade_id(&mut self) -> u64 {
        let id = self.next_trade_id;
        self.next_trade_id += 1;
        id
    }

    fn emit_trade(&self, trade: &Trade) {
        if self.config.verbose_logging {
            info!(
                target: "tickbook::trades",
                price = trade.price,
                qty = trade.quantity,
                buy_id = trade.buy_order_id,
                sell_id = trade.sell_order_id,
                "trade"
            );
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
