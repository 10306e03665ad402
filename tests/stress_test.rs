//! Randomized stress tests for the tickbook engine.
//!
//! These drive large seeded workloads through the public surface and verify:
//! 1. Structural invariants hold after sustained churn
//! 2. Identical operation sequences produce identical state roots
//! 3. The book stays bounded when flows are balanced
//!
//! ```bash
//! cargo test --release --test stress_test -- --nocapture
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use tickbook::{BookConfig, MatchingEngine, Order, OrderBook, Side};

// ============================================================================
// HELPERS
// ============================================================================

/// 0.01 in fixed-point ticks
const CENT: u64 = 1_000_000;

fn quiet_engine() -> MatchingEngine {
    let mut config = BookConfig::default();
    config.verbose_logging = false;
    MatchingEngine::with_config(config)
}

/// Generate a deterministic order stream around 100.00 on a cent grid.
///
/// Same seed, same orders.
fn generate_orders(count: usize, seed: u64) -> Vec<Order> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut orders = Vec::with_capacity(count);

    for i in 0..count {
        let is_buy = rng.gen_bool(0.5);
        // 90.00 ..= 110.00 in cent steps
        let price = rng.gen_range(9_000u64..=11_000) * CENT;
        let quantity = rng.gen_range(1u64..=1_000);

        orders.push(Order::new(
            (i + 1) as u64,
            if is_buy { Side::Buy } else { Side::Sell },
            price,
            quantity,
            i as u64,
        ));
    }

    orders
}

/// Submit a seeded order stream into a fresh book, returning its state root.
fn run_sequence(seed: u64, count: usize) -> [u8; 32] {
    let orders = generate_orders(count, seed);
    let mut book = OrderBook::with_capacity(count);
    let mut engine = quiet_engine();

    for order in orders {
        let submitted = order.quantity;
        let result = engine.submit(&mut book, order);
        let traded: u64 = result.trades.iter().map(|t| t.quantity).sum();
        assert_eq!(traded + result.remaining, submitted, "quantity not conserved");
    }

    book.compute_state_root()
}

/// Full structural sweep: aggregates, orderings, index consistency.
fn verify_book(book: &OrderBook) {
    let mut bids = Vec::new();
    let mut asks = Vec::new();
    book.snapshot(usize::MAX, &mut bids, &mut asks);

    for pair in bids.windows(2) {
        assert!(pair[0].price > pair[1].price, "bids not descending");
    }
    for pair in asks.windows(2) {
        assert!(pair[0].price < pair[1].price, "asks not ascending");
    }
    if let (Some(bid), Some(ask)) = (book.best_bid(), book.best_ask()) {
        assert!(bid < ask, "book left crossed");
    }

    let mut linked = 0usize;
    for (side, levels) in [(Side::Buy, &bids), (Side::Sell, &asks)] {
        for level in levels.iter() {
            let orders = book.level_orders(side, level.price);
            assert!(!orders.is_empty(), "empty level reachable");
            let sum: u64 = orders.iter().map(|o| o.quantity).sum();
            assert_eq!(level.total_quantity, sum, "aggregate drifted from queue");
            linked += orders.len();
        }
    }
    assert_eq!(book.order_count(), linked, "index and levels disagree");
}

// ============================================================================
// STRESS TESTS
// ============================================================================

/// Sustained add churn: 50k orders with overlapping prices, then verify
/// every invariant over the surviving book.
#[test]
fn stress_add_churn() {
    const COUNT: usize = 50_000;

    let orders = generate_orders(COUNT, 42);
    let mut book = OrderBook::with_capacity(COUNT);
    let mut engine = quiet_engine();

    let mut trade_count = 0usize;
    for order in orders {
        trade_count += engine.submit(&mut book, order).trades.len();
    }

    println!("orders: {}, trades: {}, resting: {}", COUNT, trade_count, book.order_count());

    assert!(trade_count > 0, "overlapping flow must trade");
    verify_book(&book);
}

/// Identical sequences must produce identical state roots; a different seed
/// must not.
#[test]
fn verify_determinism() {
    const COUNT: usize = 10_000;
    const SEED: u64 = 12_345;

    let root1 = run_sequence(SEED, COUNT);
    let root2 = run_sequence(SEED, COUNT);
    let root3 = run_sequence(SEED + 1, COUNT);

    println!("run 1: {}", hex::encode(root1));
    println!("run 2: {}", hex::encode(root2));
    println!("other: {}", hex::encode(root3));

    assert_eq!(root1, root2, "state roots must match for identical input");
    assert_ne!(root1, root3, "different input should diverge");
}

/// Mixed 70/20/10 add/cancel/amend workload.
#[test]
fn stress_mixed_operations() {
    const ITERATIONS: usize = 20_000;

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut book = OrderBook::with_capacity(ITERATIONS);
    let mut engine = quiet_engine();

    let mut next_id = 1u64;
    let mut candidates: Vec<u64> = Vec::new();
    let mut cancels = 0usize;
    let mut amends = 0usize;

    for i in 0..ITERATIONS {
        let op = rng.gen_range(0..10);

        if op < 7 || candidates.is_empty() {
            let is_buy = rng.gen_bool(0.5);
            let price = rng.gen_range(9_900u64..=10_100) * CENT;
            let quantity = rng.gen_range(1u64..=500);
            let id = next_id;
            next_id += 1;

            let result = engine.submit(
                &mut book,
                Order::new(id, if is_buy { Side::Buy } else { Side::Sell }, price, quantity, i as u64),
            );
            if result.remaining > 0 {
                candidates.push(id);
            }
        } else if op < 9 {
            let idx = rng.gen_range(0..candidates.len());
            let id = candidates.swap_remove(idx);
            // May already have been matched away; false is fine
            if engine.cancel(&mut book, id) {
                cancels += 1;
            }
        } else {
            let idx = rng.gen_range(0..candidates.len());
            let id = candidates[idx];
            let price = rng.gen_range(9_900u64..=10_100) * CENT;
            let quantity = rng.gen_range(1u64..=500);
            if engine.amend(&mut book, id, price, quantity) {
                amends += 1;
            }
        }

        if i % 5_000 == 0 {
            verify_book(&book);
        }
    }

    println!(
        "ops: {}, cancels: {}, amends: {}, resting: {}",
        ITERATIONS, cancels, amends, book.order_count()
    );

    verify_book(&book);
}

/// With balanced flow on a tight spread the book must not grow unbounded:
/// matching plus slab slot reuse keeps resting state bounded.
#[test]
fn stress_memory_stability() {
    const ITERATIONS: usize = 50_000;
    const MAX_BOOK_SIZE: usize = 25_000;

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut book = OrderBook::with_capacity(MAX_BOOK_SIZE);
    let mut engine = quiet_engine();

    let mut max_size_seen = 0usize;

    for i in 0..ITERATIONS {
        let is_buy = rng.gen_bool(0.5);
        // Tight band for heavy crossing
        let price = rng.gen_range(9_990u64..=10_010) * CENT;
        let quantity = rng.gen_range(1u64..=100);

        engine.submit(
            &mut book,
            Order::new(
                (i + 1) as u64,
                if is_buy { Side::Buy } else { Side::Sell },
                price,
                quantity,
                i as u64,
            ),
        );

        max_size_seen = max_size_seen.max(book.order_count());
    }

    println!("max resting: {}, final resting: {}", max_size_seen, book.order_count());

    assert!(
        max_size_seen < MAX_BOOK_SIZE,
        "book grew too large: {} (max {})",
        max_size_seen,
        MAX_BOOK_SIZE
    );
    verify_book(&book);
}
