// ============================================================================
// Fill Domain Model
// ============================================================================

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::numeric::{Price, Quantity};

use super::Order;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The immutable record of one match between an ask and a bid.
///
/// `ask` and `bid` are the two orders as they stood at the moment of the
/// match; `quantity` is the smaller of their quantities. When the
/// quantities differ, the larger side's remainder is carried in
/// `residual_ask` or `residual_bid` (never both), preserving the original
/// order id. Conservation holds per side:
/// `ask.quantity == quantity + residual_ask.quantity` and symmetrically.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fill {
    /// Unique fill identifier
    pub id: Uuid,
    /// The matched sell order
    pub ask: Order,
    /// The matched buy order
    pub bid: Order,
    /// Execution price chosen by the price-formation strategy
    pub price: Price,
    /// Traded quantity
    pub quantity: Quantity,
    /// Remainder of a partially consumed ask
    pub residual_ask: Option<Order>,
    /// Remainder of a partially consumed bid
    pub residual_bid: Option<Order>,
    /// Wall-clock execution time
    pub executed_at: DateTime<Utc>,
}

impl Fill {
    pub fn new(
        ask: Order,
        bid: Order,
        price: Price,
        quantity: Quantity,
        residual_ask: Option<Order>,
        residual_bid: Option<Order>,
    ) -> Self {
        let fill = Self {
            id: Uuid::new_v4(),
            ask,
            bid,
            price,
            quantity,
            residual_ask,
            residual_bid,
            executed_at: Utc::now(),
        };
        debug_assert!(fill.conserves_quantity(), "fill quantities do not add up");
        fill
    }

    /// Whichever residual is present.
    pub fn residual(&self) -> Option<&Order> {
        self.residual_ask.as_ref().or(self.residual_bid.as_ref())
    }

    /// Price × quantity, widened to avoid overflow.
    pub fn notional_value(&self) -> u128 {
        self.price.get() as u128 * self.quantity.get() as u128
    }

    /// Whether each side's quantity equals the traded quantity plus its
    /// residual. At most one residual may be present.
    pub fn conserves_quantity(&self) -> bool {
        if self.residual_ask.is_some() && self.residual_bid.is_some() {
            return false;
        }

        let residual_of = |residual: &Option<Order>| {
            residual.as_ref().map_or(0, |order| order.quantity().get())
        };
        self.ask.quantity().get() == self.quantity.get() + residual_of(&self.residual_ask)
            && self.bid.quantity().get() == self.quantity.get() + residual_of(&self.residual_bid)
    }
}
