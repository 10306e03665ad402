//! tickbook - demo binary
//!
//! Walks the engine through a small scenario: resting orders on both sides,
//! an in-place amend, a price-moving amend, a cancel and a depth-limited
//! snapshot, printing the book after each step.

use std::time::{SystemTime, UNIX_EPOCH};

use tickbook::types::price::from_fixed;
use tickbook::{MatchingEngine, Order, OrderBook, Side};

fn timestamp_ns() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Two-column book rendering over a depth snapshot.
fn print_book(book: &OrderBook, depth: usize) {
    let mut bids = Vec::new();
    let mut asks = Vec::new();
    book.snapshot(depth, &mut bids, &mut asks);

    println!("\n========== ORDER BOOK ==========");
    println!(
        "{:>15} {:>12}  |  {:>12} {:>15}",
        "BID QTY", "BID PX", "ASK PX", "ASK QTY"
    );
    println!("{}", "-".repeat(62));

    let rows = bids.len().max(asks.len());
    for i in 0..rows {
        match bids.get(i) {
            Some(level) => print!(
                "{:>15} {:>12}",
                from_fixed(level.total_quantity),
                from_fixed(level.price)
            ),
            None => print!("{:>15} {:>12}", "", ""),
        }
        print!("  |  ");
        match asks.get(i) {
            Some(level) => println!(
                "{:>12} {:>15}",
                from_fixed(level.price),
                from_fixed(level.total_quantity)
            ),
            None => println!("{:>12} {:>15}", "", ""),
        }
    }
    println!("================================");

    if let (Some(bid), Some(ask)) = (book.best_bid(), book.best_ask()) {
        let spread = ask - bid;
        let mid = bid + spread / 2;
        println!("Spread: {} | Mid: {}", from_fixed(spread), from_fixed(mid));
    }
    println!();
}

fn px(s: &str) -> u64 {
    tickbook::types::price::to_fixed(s).expect("demo prices are valid decimals")
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("tickbook - limit order book demo");

    let mut book = OrderBook::with_capacity(1_024);
    let mut engine = MatchingEngine::new();
    let depth = engine.config().default_snapshot_depth;

    // Seed both sides
    engine.submit(&mut book, Order::new(1, Side::Buy, px("100.0"), px("500"), timestamp_ns()));
    engine.submit(&mut book, Order::new(2, Side::Buy, px("100.0"), px("300"), timestamp_ns()));
    engine.submit(&mut book, Order::new(3, Side::Buy, px("99.5"), px("1000"), timestamp_ns()));
    engine.submit(&mut book, Order::new(4, Side::Buy, px("99.0"), px("750"), timestamp_ns()));

    engine.submit(&mut book, Order::new(5, Side::Sell, px("101.0"), px("600"), timestamp_ns()));
    engine.submit(&mut book, Order::new(6, Side::Sell, px("101.5"), px("800"), timestamp_ns()));
    engine.submit(&mut book, Order::new(7, Side::Sell, px("101.0"), px("400"), timestamp_ns()));
    engine.submit(&mut book, Order::new(8, Side::Sell, px("102.0"), px("1200"), timestamp_ns()));

    println!("\nInitial book state:");
    print_book(&book, depth);

    println!("Amending order 3 (quantity 1000 -> 2000)...");
    engine.amend(&mut book, 3, px("99.5"), px("2000"));
    print_book(&book, depth);

    println!("Amending order 5 (price 101.0 -> 100.5)...");
    engine.amend(&mut book, 5, px("100.5"), px("600"));
    print_book(&book, depth);

    println!("Cancelling order 2...");
    engine.cancel(&mut book, 2);
    print_book(&book, depth);

    println!("Submitting aggressive buy: 900 @ 100.5 (crosses the ask)...");
    let result = engine.submit(&mut book, Order::new(9, Side::Buy, px("100.5"), px("900"), timestamp_ns()));
    for trade in &result.trades {
        println!(
            "  trade: {} @ {} (buy {} / sell {})",
            from_fixed(trade.quantity),
            from_fixed(trade.price),
            trade.buy_order_id,
            trade.sell_order_id
        );
    }
    print_book(&book, depth);

    println!("Top 3 levels snapshot:");
    let mut bids = Vec::new();
    let mut asks = Vec::new();
    book.snapshot(3, &mut bids, &mut asks);
    println!("BIDS:");
    for level in &bids {
        println!("  Price: {}, Qty: {}", from_fixed(level.price), from_fixed(level.total_quantity));
    }
    println!("ASKS:");
    for level in &asks {
        println!("  Price: {}, Qty: {}", from_fixed(level.price), from_fixed(level.total_quantity));
    }

    println!("\nState root: {}", {
        let root = book.compute_state_root();
        root.iter().map(|b| format!("{:02x}", b)).collect::<String>()
    });
}
