// ============================================================================
// Price-Time Priority Orderings
// Total orders over ask-side and bid-side orders
// ============================================================================

use crate::domain::{Order, OrderId};
use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Priority Key
// ============================================================================

/// Price aggressiveness component of a priority key.
///
/// Market orders sort strictly ahead of every limit order on their side.
/// Limit ranks are side-specific: ask priorities store the price as-is
/// (lowest first), bid priorities store it negated (highest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PriceRank {
    /// Infinitely aggressive: takes the front of the book
    Market,
    Limit(i128),
}

/// Sort key realizing price-time priority for one side of the book.
///
/// The total order is `(rank, timestamp, id)`: better-ranked orders first,
/// ties broken by earlier timestamp, remaining ties by id. The minimum key
/// is the best order. Including the unique id makes the order strict, so
/// two distinct orders never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PriorityKey {
    pub rank: PriceRank,
    pub timestamp: u64,
    pub id: OrderId,
}

// ============================================================================
// Ordering Strategy
// ============================================================================

/// Strategy producing the priority key for one side of the book.
///
/// Implementations must be total and strict over orders of their side; the
/// half-book uses the keys both for its sorted view and to define "best".
pub trait BookOrdering: Send + Sync {
    /// Compute the sort key for an order of this side.
    fn priority(&self, order: &Order) -> PriorityKey;

    /// Strategy name for logging/metrics.
    fn name(&self) -> &str;

    /// Compare two orders of this side.
    fn compare(&self, a: &Order, b: &Order) -> Ordering {
        self.priority(a).cmp(&self.priority(b))
    }
}

/// Ask-side priority: market first, then lowest price, earliest timestamp.
pub struct AskPriority;

impl BookOrdering for AskPriority {
    fn priority(&self, order: &Order) -> PriorityKey {
        let rank = match order.price() {
            Some(price) => PriceRank::Limit(price.get() as i128),
            None => PriceRank::Market,
        };

        PriorityKey {
            rank,
            timestamp: order.timestamp(),
            id: order.id(),
        }
    }

    fn name(&self) -> &str {
        "AskPriority"
    }
}

/// Bid-side priority: market first, then highest price, earliest timestamp.
pub struct BidPriority;

impl BookOrdering for BidPriority {
    fn priority(&self, order: &Order) -> PriorityKey {
        let rank = match order.price() {
            Some(price) => PriceRank::Limit(-(price.get() as i128)),
            None => PriceRank::Market,
        };

        PriorityKey {
            rank,
            timestamp: order.timestamp(),
            id: order.id(),
        }
    }

    fn name(&self) -> &str {
        "BidPriority"
    }
}
