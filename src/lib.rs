// ============================================================================
// CDA Engine Library
// Continuous double-auction matching with price-time priority
// ============================================================================

//! # CDA Engine
//!
//! A continuous double-auction matching engine for a single tradable asset.
//!
//! ## Features
//!
//! - **Price-time priority** with market orders ranking ahead of limits
//! - **Pluggable strategies** for book ordering and execution pricing
//! - **Partial fills** with residual orders that keep their identity
//! - **Deterministic fill ordering** within a matching sweep
//! - **Synchronous core**: no locks, no interior mutability; hosts
//!   serialize calls
//!
//! ## Example
//!
//! ```rust
//! use cda_engine::prelude::*;
//! use std::sync::Arc;
//!
//! let mut engine = MatchingEngineBuilder::new("AAPL")
//!     .with_reference_price(100)
//!     .build(Arc::new(NoOpEventHandler))
//!     .unwrap();
//! let aapl = engine.tradable().clone();
//!
//! // A resting ask, then a crossing bid
//! let ask = Order::limit_ask("alice", aapl.clone(), 100, 10, 1).unwrap();
//! assert!(engine.find_match(ask).unwrap().is_none());
//!
//! let bid = Order::limit_bid("bob", aapl, 105, 10, 2).unwrap();
//! let fills = engine.find_match(bid).unwrap().unwrap();
//! assert_eq!(fills.len(), 1);
//! assert_eq!(fills[0].price.get(), 100);
//! assert_eq!(engine.reference_price().get(), 100);
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::order::state::{OrderState, OrderStateTransition};
    pub use crate::domain::{
        AskPriority, BidPriority, BookOrdering, EngineConfig, EngineError, EngineResult, Fill,
        HalfBook, Order, OrderCore, OrderId, PriorityKey, Side, Tradable,
    };
    pub use crate::engine::{
        create_from_config, MatchingEngine, MatchingEngineBuilder, ReferencePricing,
    };
    pub use crate::interfaces::{
        EventHandler, LoggingEventHandler, NoOpEventHandler, OrderEvent, PriceFormation,
        PricingContext,
    };
    pub use crate::numeric::{NumericError, NumericResult, Price, Quantity};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use std::sync::{Arc, Mutex};

    struct RecordingHandler {
        events: Mutex<Vec<OrderEvent>>,
    }

    impl RecordingHandler {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                events: Mutex::new(Vec::new()),
            })
        }
    }

    impl EventHandler for RecordingHandler {
        fn on_event(&self, event: OrderEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[test]
    fn test_end_to_end_matching() {
        let handler = RecordingHandler::new();
        let mut engine = MatchingEngineBuilder::new("BTC-USD")
            .with_reference_price(50_000)
            .build(handler.clone())
            .unwrap();
        let tradable = engine.tradable().clone();

        let sell = Order::limit_ask("seller", tradable.clone(), 50_000, 1, 1).unwrap();
        assert!(engine.find_match(sell).unwrap().is_none());

        let buy = Order::limit_bid("buyer", tradable, 50_000, 1, 2).unwrap();
        let fills = engine.find_match(buy).unwrap().unwrap();

        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].price.get(), 50_000);
        assert_eq!(engine.len_asks(), 0);
        assert_eq!(engine.len_bids(), 0);

        let events = handler.events.lock().unwrap();
        assert!(events
            .iter()
            .any(|e| matches!(e, OrderEvent::OrderRested { .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, OrderEvent::OrderMatched { .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, OrderEvent::OrderFilled { .. })));
    }

    #[test]
    fn test_partial_fill_reports_residual_events() {
        let handler = RecordingHandler::new();
        let mut engine = MatchingEngineBuilder::new("AAPL")
            .build(handler.clone())
            .unwrap();
        let tradable = engine.tradable().clone();

        let ask = Order::limit_ask("alice", tradable.clone(), 50, 10, 1).unwrap();
        engine.find_match(ask).unwrap();

        // 15 against 10: one fill, residual of 5 rests on the bid side
        let bid = Order::limit_bid("bob", tradable, 55, 15, 2).unwrap();
        let fills = engine.find_match(bid).unwrap().unwrap();
        assert_eq!(fills.len(), 1);

        let events = handler.events.lock().unwrap();
        let partial = events.iter().find_map(|e| match e {
            OrderEvent::OrderPartiallyFilled {
                filled_quantity,
                remaining_quantity,
                ..
            } => Some((filled_quantity.get(), remaining_quantity.get())),
            _ => None,
        });
        assert_eq!(partial, Some((10, 5)));
    }

    #[test]
    fn test_quantity_conserved_over_random_flow() {
        let mut engine = MatchingEngineBuilder::new("AAPL")
            .with_reference_price(50)
            .build(Arc::new(NoOpEventHandler))
            .unwrap();
        let tradable = engine.tradable().clone();

        // A deterministic mixed flow; quantities and prices spread enough
        // to exercise rests, sweeps and partials.
        let orders: Vec<Order> = (0u64..40)
            .map(|i| {
                let quantity = 1 + (i * 7 + 3) % 13;
                let price = 45 + (i * 11) % 10;
                match i % 4 {
                    0 => Order::limit_ask("a", tradable.clone(), price, quantity, i),
                    1 => Order::limit_bid("b", tradable.clone(), price, quantity, i),
                    2 => Order::market_ask("c", tradable.clone(), quantity, i),
                    _ => Order::market_bid("d", tradable.clone(), quantity, i),
                }
                .unwrap()
            })
            .collect();

        let submitted: u64 = orders.iter().map(|o| o.quantity().get()).sum();
        let mut traded = 0u64;
        for order in orders {
            if let Some(fills) = engine.find_match(order).unwrap() {
                for fill in &fills {
                    assert!(fill.conserves_quantity());
                    traded += fill.quantity.get();
                }
            }
        }

        let resting: u64 = engine
            .ask_iter()
            .chain(engine.bid_iter())
            .map(|o| o.quantity().get())
            .sum();
        // Every submitted unit either traded (counted once per side) or rests
        assert_eq!(submitted, 2 * traded + resting);

        // And the limit book is never crossed
        if let (Some(ask), Some(bid)) =
            (engine.best_limit_ask_price(), engine.best_limit_bid_price())
        {
            assert!(ask >= bid);
        }
    }

    #[test]
    fn test_cancel_releases_priority() {
        let mut engine = MatchingEngineBuilder::new("AAPL")
            .build(Arc::new(NoOpEventHandler))
            .unwrap();
        let tradable = engine.tradable().clone();

        let first = Order::limit_ask("alice", tradable.clone(), 50, 5, 1).unwrap();
        let second = Order::limit_ask("bob", tradable.clone(), 50, 5, 2).unwrap();
        engine.find_match(first.clone()).unwrap();
        engine.find_match(second.clone()).unwrap();

        assert!(engine.cancel(&first).is_some());

        let bid = Order::market_bid("carol", tradable, 5, 3).unwrap();
        let fills = engine.find_match(bid).unwrap().unwrap();
        assert_eq!(fills[0].ask.id(), second.id());
    }
}
