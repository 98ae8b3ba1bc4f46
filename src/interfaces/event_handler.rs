// ============================================================================
// Event Handler Interface
// Defines the contract for observing engine activity
// ============================================================================

use crate::domain::{Fill, OrderId};
use crate::numeric::{Price, Quantity};
use chrono::{DateTime, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Events reported by the matching engine.
///
/// Events are observability only: fills are returned from `find_match`
/// directly, and a host forwards those to settlement. Handlers must not
/// influence matching.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrderEvent {
    /// Order handed to the engine
    OrderReceived {
        order_id: OrderId,
        timestamp: DateTime<Utc>,
    },

    /// Order rejected with reason
    OrderRejected {
        order_id: OrderId,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// Order matched, fill produced
    OrderMatched {
        fill: Fill,
        timestamp: DateTime<Utc>,
    },

    /// Incoming order partially filled before resting
    OrderPartiallyFilled {
        order_id: OrderId,
        filled_quantity: Quantity,
        remaining_quantity: Quantity,
        timestamp: DateTime<Utc>,
    },

    /// Incoming order fully filled
    OrderFilled {
        order_id: OrderId,
        total_filled: Quantity,
        timestamp: DateTime<Utc>,
    },

    /// Order added to its half-book
    OrderRested {
        order_id: OrderId,
        price: Option<Price>,
        quantity: Quantity,
        timestamp: DateTime<Utc>,
    },

    /// Resting order removed by cancellation
    OrderCancelled {
        order_id: OrderId,
        timestamp: DateTime<Utc>,
    },
}

/// Event handler trait for processing matching engine events
/// Implementations can handle logging, metrics, notifications, etc.
pub trait EventHandler: Send + Sync {
    /// Handle an order event
    fn on_event(&self, event: OrderEvent);

    /// Batch event handler (optional optimization)
    fn on_events(&self, events: Vec<OrderEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op event handler for testing
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_event(&self, _event: OrderEvent) {
        // Do nothing
    }
}

/// Logging event handler
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_event(&self, event: OrderEvent) {
        tracing::debug!("Matching engine event: {:?}", event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingHandler {
        events: Mutex<Vec<OrderEvent>>,
    }

    impl EventHandler for RecordingHandler {
        fn on_event(&self, event: OrderEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[test]
    fn test_noop_handler() {
        let handler = NoOpEventHandler;
        handler.on_event(OrderEvent::OrderReceived {
            order_id: OrderId::new(),
            timestamp: Utc::now(),
        });
        // Should not panic
    }

    #[test]
    fn test_batch_delegates_to_on_event() {
        let handler = RecordingHandler {
            events: Mutex::new(Vec::new()),
        };
        let id = OrderId::new();
        handler.on_events(vec![
            OrderEvent::OrderReceived {
                order_id: id,
                timestamp: Utc::now(),
            },
            OrderEvent::OrderCancelled {
                order_id: id,
                timestamp: Utc::now(),
            },
        ]);
        assert_eq!(handler.events.lock().unwrap().len(), 2);
    }
}
