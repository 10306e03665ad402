//! The order book: two price-ordered sides over one slab-backed order pool.
//!
//! ## Architecture
//!
//! - **Slab**: owns every `OrderNode`. Construct/destroy are O(1), freed
//!   slots are recycled from the slab's internal free list, and keys stay
//!   stable for the node's whole lifetime.
//! - **BTreeMap per side**: bids keyed on `Reverse(price)` so iteration is
//!   high-to-low, asks keyed on `price` so iteration is low-to-high. The
//!   first entry of each map is the best price.
//! - **HashMap index**: order id to slab key, giving O(1) cancel and amend.
//!
//! ## Invariants
//!
//! - A level's `total_quantity` equals the sum of its queued orders.
//! - An id is in the index iff its node is linked into exactly one level.
//! - A drained level is erased immediately; neither map ever holds an empty
//!   level.
//!
//! Methods that navigate from one structure to another under these
//! invariants (index to node, node to level) treat a miss as a torn book and
//! abort rather than limp on.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use sha2::{Digest, Sha256};
use slab::Slab;

use crate::orderbook::{OrderNode, PriceLevel};
use crate::types::{Order, Side};

/// One row of a depth snapshot: a price and its aggregate resting quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthLevel {
    /// Level price in fixed-point ticks
    pub price: u64,
    /// Sum of remaining quantities resting at this price
    pub total_quantity: u64,
}

/// Single-instrument limit order book.
///
/// Holds only *resting* state; crossing an incoming order against this book
/// is the [`crate::engine::MatchingEngine`]'s job.
#[derive(Debug)]
pub struct OrderBook {
    /// Node pool: slab-allocated storage for every resting order
    orders: Slab<OrderNode>,

    /// Bid levels, iterated best (highest) first
    bids: BTreeMap<Reverse<u64>, PriceLevel>,

    /// Ask levels, iterated best (lowest) first
    asks: BTreeMap<u64, PriceLevel>,

    /// Order id to slab key, for O(1) cancel/amend
    order_index: HashMap<u64, usize>,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    /// Create an empty book.
    pub fn new() -> Self {
        Self {
            orders: Slab::new(),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            order_index: HashMap::new(),
        }
    }

    /// Create a book with slots for `order_capacity` resting orders
    /// pre-allocated, so the steady state never grows the pool.
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            orders: Slab::with_capacity(order_capacity),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            order_index: HashMap::with_capacity(order_capacity),
        }
    }

    // ========================================================================
    // Observers
    // ========================================================================

    /// Pre-allocated node-pool slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    /// Number of resting orders across both sides
    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// True when nothing rests on either side
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Number of distinct bid prices
    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.len()
    }

    /// Number of distinct ask prices
    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.asks.len()
    }

    /// True when `order_id` currently rests in the book
    #[inline]
    pub fn contains_order(&self, order_id: u64) -> bool {
        self.order_index.contains_key(&order_id)
    }

    /// The resting order for `order_id`, if any
    pub fn get_order(&self, order_id: u64) -> Option<&Order> {
        self.order_index
            .get(&order_id)
            .and_then(|&key| self.orders.get(key))
            .map(|node| &node.order)
    }

    /// The order stored at slab key `key`, if live.
    ///
    /// Keys come from [`PriceLevel::peek_head`] and queue traversal; this is
    /// the matching engine's view into the pool.
    #[inline]
    pub fn order_at(&self, key: usize) -> Option<&Order> {
        self.orders.get(key).map(|node| &node.order)
    }

    /// Best (highest) bid price
    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.keys().next().map(|r| r.0)
    }

    /// Best (lowest) ask price
    #[inline]
    pub fn best_ask(&self) -> Option<u64> {
        self.asks.keys().next().copied()
    }

    /// `best_ask - best_bid`, when both sides are populated
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) if ask >= bid => Some(ask - bid),
            _ => None,
        }
    }

    /// Best level on the given side, None when that side is empty.
    pub fn best_level(&self, side: Side) -> Option<&PriceLevel> {
        match side {
            Side::Buy => self.bids.values().next(),
            Side::Sell => self.asks.values().next(),
        }
    }

    /// The level resting at `price` on `side`, if any.
    pub fn level(&self, side: Side, price: u64) -> Option<&PriceLevel> {
        match side {
            Side::Buy => self.bids.get(&Reverse(price)),
            Side::Sell => self.asks.get(&price),
        }
    }

    /// The orders queued at `price` on `side`, oldest first.
    ///
    /// Intended for tests and read-side consumers; the hot path never
    /// materializes a level.
    pub fn level_orders(&self, side: Side, price: u64) -> Vec<Order> {
        let Some(level) = self.level(side, price) else {
            return Vec::new();
        };

        let mut out = Vec::with_capacity(level.order_count);
        let mut cursor = level.head;
        while let Some(key) = cursor {
            let node = &self.orders[key];
            out.push(node.order.clone());
            cursor = node.next;
        }
        out
    }

    // ========================================================================
    // Resting-state mutation
    // ========================================================================

    /// Rest `order` in the book without matching it.
    ///
    /// Returns the node's slab key, or None when the id already rests in the
    /// book (the duplicate is dropped and nothing changes).
    pub fn rest_order(&mut self, order: Order) -> Option<usize> {
        if self.order_index.contains_key(&order.id) {
            return None;
        }

        let order_id = order.id;
        let price = order.price;
        let side = order.side();

        let key = self.orders.insert(OrderNode::new(order));
        self.order_index.insert(order_id, key);

        match side {
            Side::Buy => {
                self.bids
                    .entry(Reverse(price))
                    .or_insert_with(|| PriceLevel::new(price))
                    .push_back(key, &mut self.orders);
            }
            Side::Sell => {
                self.asks
                    .entry(price)
                    .or_insert_with(|| PriceLevel::new(price))
                    .push_back(key, &mut self.orders);
            }
        }

        Some(key)
    }

    /// Unlink, unindex and destroy the node at `key`.
    ///
    /// Erases the owning level if the removal drained it. Returns the
    /// removed order, or None for a key that is not live.
    pub fn remove_order(&mut self, key: usize) -> Option<Order> {
        let node = self.orders.get(key)?;
        let order_id = node.order_id();
        let price = node.price();
        let side = node.side();

        match side {
            Side::Buy => {
                let level = self
                    .bids
                    .get_mut(&Reverse(price))
                    .expect("resting bid without a level");
                level.remove(key, &mut self.orders);
                if level.is_empty() {
                    self.bids.remove(&Reverse(price));
                }
            }
            Side::Sell => {
                let level = self
                    .asks
                    .get_mut(&price)
                    .expect("resting ask without a level");
                level.remove(key, &mut self.orders);
                if level.is_empty() {
                    self.asks.remove(&price);
                }
            }
        }

        self.order_index.remove(&order_id);
        Some(self.orders.remove(key).order)
    }

    /// Cancel by order id. Returns the cancelled order, None if unknown.
    pub fn cancel_order(&mut self, order_id: u64) -> Option<Order> {
        let key = *self.order_index.get(&order_id)?;
        self.remove_order(key)
    }

    /// Partially fill the resting node at `key`, keeping it linked.
    ///
    /// Decrements both the node and its level's aggregate. Returns the
    /// quantity actually consumed.
    pub fn fill_resting(&mut self, key: usize, quantity: u64) -> u64 {
        let (price, side) = {
            let node = &self.orders[key];
            (node.price(), node.side())
        };

        match side {
            Side::Buy => self
                .bids
                .get_mut(&Reverse(price))
                .expect("resting bid without a level")
                .fill_order(key, quantity, &mut self.orders),
            Side::Sell => self
                .asks
                .get_mut(&price)
                .expect("resting ask without a level")
                .fill_order(key, quantity, &mut self.orders),
        }
    }

    /// Rewrite a resting order's quantity in place, preserving its queue
    /// position. Returns false when the id is unknown.
    pub fn amend_quantity(&mut self, order_id: u64, new_quantity: u64) -> bool {
        let Some(&key) = self.order_index.get(&order_id) else {
            return false;
        };

        let (price, side) = {
            let node = &self.orders[key];
            (node.price(), node.side())
        };

        match side {
            Side::Buy => {
                self.bids
                    .get_mut(&Reverse(price))
                    .expect("resting bid without a level")
                    .update_quantity(key, new_quantity, &mut self.orders);
            }
            Side::Sell => {
                self.asks
                    .get_mut(&price)
                    .expect("resting ask without a level")
                    .update_quantity(key, new_quantity, &mut self.orders);
            }
        }

        true
    }

    // ========================================================================
    // Snapshot
    // ========================================================================

    /// Fill `bids_out`/`asks_out` with the top `depth` levels of each side.
    ///
    /// Output order mirrors iteration order: bids descending, asks
    /// ascending. The outputs are cleared and reserved up front; the walk
    /// itself allocates nothing.
    pub fn snapshot(
        &self,
        depth: usize,
        bids_out: &mut Vec<DepthLevel>,
        asks_out: &mut Vec<DepthLevel>,
    ) {
        bids_out.clear();
        asks_out.clear();
        bids_out.reserve(depth.min(self.bids.len()));
        asks_out.reserve(depth.min(self.asks.len()));

        for level in self.bids.values().take(depth) {
            bids_out.push(DepthLevel {
                price: level.price,
                total_quantity: level.total_quantity,
            });
        }
        for level in self.asks.values().take(depth) {
            asks_out.push(DepthLevel {
                price: level.price,
                total_quantity: level.total_quantity,
            });
        }
    }

    // ========================================================================
    // State root
    // ========================================================================

    /// SHA-256 over the SSZ bytes of every resting order, in deterministic
    /// book order: bids best-first, then asks best-first, FIFO within each
    /// level.
    ///
    /// Two books with identical resting state produce identical roots, which
    /// is what the determinism tests key on.
    pub fn compute_state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();

        for level in self.bids.values() {
            self.hash_level(level, &mut hasher);
        }
        for level in self.asks.values() {
            self.hash_level(level, &mut hasher);
        }

        let mut root = [0u8; 32];
        root.copy_from_slice(&hasher.finalize());
        root
    }

    fn hash_level(&self, level: &PriceLevel, hasher: &mut Sha256) {
        let mut cursor = level.head;
        while let Some(key) = cursor {
            let node = &self.orders[key];
            let bytes =
                ssz_rs::serialize(&node.order).expect("fixed-size order always serializes");
            hasher.update(&bytes);
            cursor = node.next;
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
