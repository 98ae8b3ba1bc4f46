// ============================================================================
// Matching Engine
// Core business logic for continuous double-auction matching
// ============================================================================

use crate::domain::order::state::{OrderState, OrderStateTransition};
use crate::domain::{
    BookOrdering, EngineError, EngineResult, Fill, HalfBook, Order, Side, Tradable,
};
use crate::interfaces::{EventHandler, OrderEvent, PriceFormation, PricingContext};
use crate::numeric::Price;
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::Arc;

/// Continuous double-auction matching engine for a single tradable.
///
/// Owns the two half-books, the reference price and the price-formation
/// strategy. `find_match` and `cancel` run to completion on the calling
/// thread; the engine holds no locks and no shared mutable state, so a host
/// that needs concurrency serializes calls externally.
///
/// Between calls the book is never crossed: the best limit ask price is at
/// least the best limit bid price whenever both exist. Market orders may
/// rest on either side but establish no price.
pub struct MatchingEngine {
    /// The instrument this engine is bound to
    tradable: Tradable,

    /// Ask side of the order book
    asks: HalfBook,

    /// Bid side of the order book
    bids: HalfBook,

    /// Last traded price, or the configured initial value
    reference_price: Price,

    /// Pluggable execution pricing
    pricing: Box<dyn PriceFormation>,

    /// Event handler for observability
    event_handler: Arc<dyn EventHandler>,
}

impl MatchingEngine {
    /// Create a new matching engine.
    pub fn new(
        tradable: Tradable,
        ask_ordering: Box<dyn BookOrdering>,
        bid_ordering: Box<dyn BookOrdering>,
        initial_reference_price: Price,
        pricing: Box<dyn PriceFormation>,
        event_handler: Arc<dyn EventHandler>,
    ) -> Self {
        Self {
            asks: HalfBook::new(Side::Ask, tradable.clone(), ask_ordering),
            bids: HalfBook::new(Side::Bid, tradable.clone(), bid_ordering),
            tradable,
            reference_price: initial_reference_price,
            pricing,
            event_handler,
        }
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Match an incoming order against the opposite half-book.
    ///
    /// Repeatedly pairs the order with the best crossing order on the
    /// opposite side. Partial fills split the larger order: an incoming
    /// residual keeps matching, a resting residual re-enters its book and
    /// ends the sweep. Whatever remains unmatched rests in the incoming
    /// order's own book.
    ///
    /// Returns the fills in production order, or `None` when the order
    /// rested without trading.
    ///
    /// # Errors
    /// `InvalidTradable` or `DuplicateOrder` reject the order up front with
    /// the book untouched. `InvariantViolation` signals internal corruption.
    pub fn find_match(&mut self, incoming: Order) -> EngineResult<Option<VecDeque<Fill>>> {
        let incoming_id = incoming.id();
        let mut events = vec![OrderEvent::OrderReceived {
            order_id: incoming_id,
            timestamp: Utc::now(),
        }];

        if let Err(error) = self.validate_incoming(&incoming) {
            events.push(OrderEvent::OrderRejected {
                order_id: incoming_id,
                reason: error.to_string(),
                timestamp: Utc::now(),
            });
            self.event_handler.on_events(events);
            return Err(error);
        }

        let original_quantity = incoming.quantity();
        let mut state = OrderState::Incoming;
        let mut current = incoming;
        let mut fills: VecDeque<Fill> = VecDeque::new();

        loop {
            // Pop the opposite best only if it crosses the current order.
            let best = {
                let opposite = match current.side() {
                    Side::Ask => &mut self.bids,
                    Side::Bid => &mut self.asks,
                };
                match opposite.peek_best() {
                    Some(best) if current.crosses(best) => opposite.pop_best(),
                    _ => None,
                }
            };

            let Some(best) = best else {
                // Nothing crosses: the current order (or residual) rests.
                if !fills.is_empty() {
                    let filled = original_quantity
                        .checked_sub(current.quantity())
                        .map_err(|_| EngineError::InvariantViolation)?;
                    events.push(OrderEvent::OrderPartiallyFilled {
                        order_id: incoming_id,
                        filled_quantity: filled,
                        remaining_quantity: current.quantity(),
                        timestamp: Utc::now(),
                    });
                }
                state = state.transition(OrderStateTransition::Rest)?;
                events.push(OrderEvent::OrderRested {
                    order_id: incoming_id,
                    price: current.price(),
                    quantity: current.quantity(),
                    timestamp: Utc::now(),
                });

                let own = match current.side() {
                    Side::Ask => &mut self.asks,
                    Side::Bid => &mut self.bids,
                };
                own.add(current)?;
                break;
            };

            // The last traded price becomes the new reference.
            let ctx = PricingContext {
                reference_price: self.reference_price,
                ask_anchor: self.best_limit_ask_price(),
            };
            let execution_price = self.pricing.execution_price(&current, &best, &ctx);
            self.reference_price = execution_price;

            let trade_quantity = current.quantity().min(best.quantity());
            let incoming_side = current.side();

            use std::cmp::Ordering::{Equal, Greater, Less};
            match current.quantity().cmp(&best.quantity()) {
                Greater => {
                    // Resting order consumed in full; incoming residual
                    // continues the sweep.
                    let residual_quantity = current
                        .quantity()
                        .checked_sub(best.quantity())
                        .map_err(|_| EngineError::InvariantViolation)?;
                    let (_, residual) = current.split(residual_quantity)?;

                    let fill = match incoming_side {
                        Side::Ask => Fill::new(
                            current,
                            best,
                            execution_price,
                            trade_quantity,
                            Some(residual.clone()),
                            None,
                        ),
                        Side::Bid => Fill::new(
                            best,
                            current,
                            execution_price,
                            trade_quantity,
                            None,
                            Some(residual.clone()),
                        ),
                    };
                    events.push(OrderEvent::OrderMatched {
                        fill: fill.clone(),
                        timestamp: Utc::now(),
                    });
                    fills.push_back(fill);

                    state = state
                        .transition(OrderStateTransition::PartialFill)?
                        .transition(OrderStateTransition::Continue)?;
                    current = residual;
                },
                Less => {
                    // Incoming consumed in full; the resting residual goes
                    // back to its book.
                    let residual_quantity = best
                        .quantity()
                        .checked_sub(current.quantity())
                        .map_err(|_| EngineError::InvariantViolation)?;
                    let (_, resting_residual) = best.split(residual_quantity)?;

                    let fill = match incoming_side {
                        Side::Ask => Fill::new(
                            current,
                            best,
                            execution_price,
                            trade_quantity,
                            None,
                            Some(resting_residual.clone()),
                        ),
                        Side::Bid => Fill::new(
                            best,
                            current,
                            execution_price,
                            trade_quantity,
                            Some(resting_residual.clone()),
                            None,
                        ),
                    };
                    events.push(OrderEvent::OrderMatched {
                        fill: fill.clone(),
                        timestamp: Utc::now(),
                    });
                    fills.push_back(fill);

                    let opposite = match incoming_side {
                        Side::Ask => &mut self.bids,
                        Side::Bid => &mut self.asks,
                    };
                    opposite.add(resting_residual)?;

                    state = state.transition(OrderStateTransition::Fill)?;
                    events.push(OrderEvent::OrderFilled {
                        order_id: incoming_id,
                        total_filled: original_quantity,
                        timestamp: Utc::now(),
                    });
                    break;
                },
                Equal => {
                    let fill = match incoming_side {
                        Side::Ask => {
                            Fill::new(current, best, execution_price, trade_quantity, None, None)
                        },
                        Side::Bid => {
                            Fill::new(best, current, execution_price, trade_quantity, None, None)
                        },
                    };
                    events.push(OrderEvent::OrderMatched {
                        fill: fill.clone(),
                        timestamp: Utc::now(),
                    });
                    fills.push_back(fill);

                    state = state.transition(OrderStateTransition::Fill)?;
                    events.push(OrderEvent::OrderFilled {
                        order_id: incoming_id,
                        total_filled: original_quantity,
                        timestamp: Utc::now(),
                    });
                    break;
                },
            }
        }

        debug_assert!(state.is_terminal() || state == OrderState::Resting);
        debug_assert!(self.asks.check_invariants().is_ok());
        debug_assert!(self.bids.check_invariants().is_ok());
        debug_assert!(!self.is_crossed(), "book crossed after matching");

        self.event_handler.on_events(events);
        Ok(if fills.is_empty() { None } else { Some(fills) })
    }

    /// Cancel a resting order.
    ///
    /// Removes the order by id from the half-book of its side. Returns the
    /// removed order, or `None` when it is not resting (never submitted,
    /// already filled, or already cancelled). Idempotent.
    pub fn cancel(&mut self, order: &Order) -> Option<Order> {
        let book = match order.side() {
            Side::Ask => &mut self.asks,
            Side::Bid => &mut self.bids,
        };
        let removed = book.remove(order.id());
        if removed.is_some() {
            self.event_handler.on_event(OrderEvent::OrderCancelled {
                order_id: order.id(),
                timestamp: Utc::now(),
            });
        }
        removed
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    pub fn tradable(&self) -> &Tradable {
        &self.tradable
    }

    pub fn reference_price(&self) -> Price {
        self.reference_price
    }

    /// Resting asks in priority order, best first.
    pub fn ask_iter(&self) -> impl Iterator<Item = &Order> {
        self.asks.iter()
    }

    /// Resting bids in priority order, best first.
    pub fn bid_iter(&self) -> impl Iterator<Item = &Order> {
        self.bids.iter()
    }

    pub fn len_asks(&self) -> usize {
        self.asks.len()
    }

    pub fn len_bids(&self) -> usize {
        self.bids.len()
    }

    /// Lowest resting limit ask price, ignoring market orders.
    pub fn best_limit_ask_price(&self) -> Option<Price> {
        self.asks.find(|order| order.is_limit()).and_then(|o| o.price())
    }

    /// Highest resting limit bid price, ignoring market orders.
    pub fn best_limit_bid_price(&self) -> Option<Price> {
        self.bids.find(|order| order.is_limit()).and_then(|o| o.price())
    }

    /// Best limit ask minus best limit bid; `None` when either side has no
    /// limit order.
    pub fn spread(&self) -> Option<u64> {
        match (self.best_limit_ask_price(), self.best_limit_bid_price()) {
            (Some(ask), Some(bid)) => ask.checked_sub(bid),
            _ => None,
        }
    }

    /// Midpoint of the best limit prices.
    pub fn mid_price(&self) -> Option<Price> {
        match (self.best_limit_ask_price(), self.best_limit_bid_price()) {
            (Some(ask), Some(bid)) => Some(ask.midpoint(bid)),
            _ => None,
        }
    }

    // ========================================================================
    // Private methods
    // ========================================================================

    fn validate_incoming(&self, order: &Order) -> EngineResult<()> {
        if order.tradable() != &self.tradable {
            return Err(EngineError::InvalidTradable);
        }
        if self.asks.contains(order.id()) || self.bids.contains(order.id()) {
            return Err(EngineError::DuplicateOrder);
        }
        Ok(())
    }

    fn is_crossed(&self) -> bool {
        match (self.best_limit_ask_price(), self.best_limit_bid_price()) {
            (Some(ask), Some(bid)) => ask < bid,
            _ => false,
        }
    }
}
