// ============================================================================
// Basic Usage Example
// Submit, match and cancel orders against a CDA engine
// ============================================================================

use cda_engine::prelude::*;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== CDA Engine Example ===\n");

    let mut engine = MatchingEngineBuilder::new("AAPL")
        .with_reference_price(100)
        .build(Arc::new(LoggingEventHandler))?;
    let aapl = engine.tradable().clone();

    println!("Engine bound to {}", engine.tradable());

    // Two asks rest at different price levels
    let ask_a = Order::limit_ask("alice", aapl.clone(), 101, 10, 1)?;
    let ask_b = Order::limit_ask("alice", aapl.clone(), 103, 10, 2)?;
    engine.find_match(ask_a)?;
    engine.find_match(ask_b.clone())?;
    println!("Resting asks: {}", engine.len_asks());

    // A large bid sweeps the cheap ask and partially fills the next
    let bid = Order::limit_bid("bob", aapl.clone(), 103, 14, 3)?;
    if let Some(fills) = engine.find_match(bid)? {
        for fill in &fills {
            println!(
                "Fill: {} @ {} (ask {}, bid {})",
                fill.quantity,
                fill.price,
                fill.ask.issuer_id(),
                fill.bid.issuer_id()
            );
        }
    }
    println!("Reference price is now {}", engine.reference_price());

    // The partially consumed ask can still be cancelled
    match engine.cancel(&ask_b) {
        Some(order) => println!("Cancelled residual of {} units", order.quantity()),
        None => println!("Nothing left to cancel"),
    }

    // A market order with no opposite side simply rests
    let market = Order::market_bid("carol", aapl, 5, 4)?;
    assert!(engine.find_match(market)?.is_none());
    println!("Resting bids: {}", engine.len_bids());

    Ok(())
}
