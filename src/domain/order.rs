// ============================================================================
// Order Domain Model
// ============================================================================

use crate::domain::errors::{EngineError, EngineResult};
use crate::numeric::{Price, Quantity};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Value Objects
// ============================================================================

/// Unique order identifier, preserved across splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderId(Uuid);

impl OrderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The symbol identity an engine instance is bound to.
///
/// Two tradables are equal when both their ticker and their id agree, so two
/// listings under the same ticker stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tradable {
    symbol: Arc<String>,
    id: Uuid,
}

impl Tradable {
    /// Create a tradable with a fresh identity.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Arc::new(symbol.into()),
            id: Uuid::new_v4(),
        }
    }

    /// Reconstruct a tradable from its parts (e.g. from a reference data feed).
    pub fn from_parts(symbol: impl Into<String>, id: Uuid) -> Self {
        Self {
            symbol: Arc::new(symbol.into()),
            id,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }
}

impl fmt::Display for Tradable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// The side of the market an order belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    /// Sell side
    Ask,
    /// Buy side
    Bid,
}

impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Side::Ask => Side::Bid,
            Side::Bid => Side::Ask,
        }
    }
}

// ============================================================================
// Order State Machine
// ============================================================================

pub mod state {
    use crate::domain::errors::{EngineError, EngineResult};

    #[cfg(feature = "serde")]
    use serde::{Deserialize, Serialize};

    /// Lifecycle states of an order as the engine sees it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub enum OrderState {
        /// Submitted and currently being matched
        Incoming,
        /// In a half-book, waiting for the opposite side
        Resting,
        /// Partially consumed; a residual carries the remainder
        PartiallyFilled,
        /// Fully consumed
        FullyFilled,
        /// Removed by explicit cancellation
        Cancelled,
    }

    impl OrderState {
        pub fn is_terminal(&self) -> bool {
            matches!(self, OrderState::FullyFilled | OrderState::Cancelled)
        }

        pub fn can_be_cancelled(&self) -> bool {
            matches!(self, OrderState::Resting)
        }

        /// Apply a transition, rejecting moves the lifecycle does not allow.
        pub fn transition(&self, transition: OrderStateTransition) -> EngineResult<OrderState> {
            match (self, transition) {
                (OrderState::Incoming, OrderStateTransition::PartialFill) => {
                    Ok(OrderState::PartiallyFilled)
                },
                (OrderState::Incoming, OrderStateTransition::Fill) => Ok(OrderState::FullyFilled),
                (OrderState::Incoming, OrderStateTransition::Rest) => Ok(OrderState::Resting),

                (OrderState::Resting, OrderStateTransition::PartialFill) => {
                    Ok(OrderState::PartiallyFilled)
                },
                (OrderState::Resting, OrderStateTransition::Fill) => Ok(OrderState::FullyFilled),
                (OrderState::Resting, OrderStateTransition::Cancel) => Ok(OrderState::Cancelled),

                // A residual resumes the lifecycle of the order it came from.
                (OrderState::PartiallyFilled, OrderStateTransition::Continue) => {
                    Ok(OrderState::Incoming)
                },
                (OrderState::PartiallyFilled, OrderStateTransition::Rest) => Ok(OrderState::Resting),

                _ => Err(EngineError::InvariantViolation),
            }
        }
    }

    /// Transitions driven by matching, resting and cancellation.
    #[derive(Debug, Clone, Copy)]
    pub enum OrderStateTransition {
        PartialFill,
        Fill,
        Rest,
        Continue,
        Cancel,
    }

}

// ============================================================================
// Order
// ============================================================================

/// Attributes shared by every order variant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderCore {
    /// Participant that issued the order
    pub issuer_id: Arc<String>,
    /// Remaining quantity, always at least one unit
    pub quantity: Quantity,
    /// Caller-assigned monotonic sequence value used for time priority
    pub timestamp: u64,
    /// The instrument this order trades
    pub tradable: Tradable,
    /// Unique identifier, preserved across splits
    pub id: OrderId,
}

/// An order, tagged by side and pricing.
///
/// The four variants are the cross of {limit, market} × {ask, bid}. Side and
/// priced-ness are determined by the tag; `crosses` is an exhaustive match
/// over variant pairs.
///
/// # Example
/// ```
/// use cda_engine::domain::{Order, Side, Tradable};
///
/// let aapl = Tradable::new("AAPL");
/// let ask = Order::limit_ask("alice", aapl.clone(), 50, 10, 1).unwrap();
/// let bid = Order::market_bid("bob", aapl, 10, 2).unwrap();
///
/// assert_eq!(ask.side(), Side::Ask);
/// assert!(ask.crosses(&bid));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Order {
    LimitAsk { core: OrderCore, price: Price },
    LimitBid { core: OrderCore, price: Price },
    MarketAsk { core: OrderCore },
    MarketBid { core: OrderCore },
}

impl Order {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create a limit sell order.
    ///
    /// # Errors
    /// `InvalidPrice` when `price` is zero, `InvalidQuantity` when
    /// `quantity` is zero.
    pub fn limit_ask(
        issuer_id: impl Into<String>,
        tradable: Tradable,
        price: u64,
        quantity: u64,
        timestamp: u64,
    ) -> EngineResult<Self> {
        Ok(Order::LimitAsk {
            price: Price::new(price).map_err(|_| EngineError::InvalidPrice)?,
            core: OrderCore::new(issuer_id, tradable, quantity, timestamp)?,
        })
    }

    /// Create a limit buy order.
    pub fn limit_bid(
        issuer_id: impl Into<String>,
        tradable: Tradable,
        price: u64,
        quantity: u64,
        timestamp: u64,
    ) -> EngineResult<Self> {
        Ok(Order::LimitBid {
            price: Price::new(price).map_err(|_| EngineError::InvalidPrice)?,
            core: OrderCore::new(issuer_id, tradable, quantity, timestamp)?,
        })
    }

    /// Create a market sell order.
    pub fn market_ask(
        issuer_id: impl Into<String>,
        tradable: Tradable,
        quantity: u64,
        timestamp: u64,
    ) -> EngineResult<Self> {
        Ok(Order::MarketAsk {
            core: OrderCore::new(issuer_id, tradable, quantity, timestamp)?,
        })
    }

    /// Create a market buy order.
    pub fn market_bid(
        issuer_id: impl Into<String>,
        tradable: Tradable,
        quantity: u64,
        timestamp: u64,
    ) -> EngineResult<Self> {
        Ok(Order::MarketBid {
            core: OrderCore::new(issuer_id, tradable, quantity, timestamp)?,
        })
    }

    /// Replace the generated id with a caller-supplied one.
    pub fn with_id(mut self, id: OrderId) -> Self {
        self.core_mut().id = id;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn core(&self) -> &OrderCore {
        match self {
            Order::LimitAsk { core, .. }
            | Order::LimitBid { core, .. }
            | Order::MarketAsk { core }
            | Order::MarketBid { core } => core,
        }
    }

    fn core_mut(&mut self) -> &mut OrderCore {
        match self {
            Order::LimitAsk { core, .. }
            | Order::LimitBid { core, .. }
            | Order::MarketAsk { core }
            | Order::MarketBid { core } => core,
        }
    }

    pub fn id(&self) -> OrderId {
        self.core().id
    }

    pub fn issuer_id(&self) -> &str {
        &self.core().issuer_id
    }

    pub fn quantity(&self) -> Quantity {
        self.core().quantity
    }

    pub fn timestamp(&self) -> u64 {
        self.core().timestamp
    }

    pub fn tradable(&self) -> &Tradable {
        &self.core().tradable
    }

    pub fn side(&self) -> Side {
        match self {
            Order::LimitAsk { .. } | Order::MarketAsk { .. } => Side::Ask,
            Order::LimitBid { .. } | Order::MarketBid { .. } => Side::Bid,
        }
    }

    /// The limit price, `None` for market orders.
    pub fn price(&self) -> Option<Price> {
        match self {
            Order::LimitAsk { price, .. } | Order::LimitBid { price, .. } => Some(*price),
            Order::MarketAsk { .. } | Order::MarketBid { .. } => None,
        }
    }

    pub fn is_market(&self) -> bool {
        matches!(self, Order::MarketAsk { .. } | Order::MarketBid { .. })
    }

    pub fn is_limit(&self) -> bool {
        !self.is_market()
    }

    // ========================================================================
    // Crossing
    // ========================================================================

    /// Whether this order is price-compatible with an opposite-side order.
    ///
    /// Market orders cross anything on the opposite side; two limits cross
    /// iff the ask price does not exceed the bid price; same-side orders
    /// never cross. Both orders must be for the same tradable.
    pub fn crosses(&self, other: &Order) -> bool {
        debug_assert_eq!(
            self.tradable(),
            other.tradable(),
            "crossing orders for different tradables"
        );

        match (self, other) {
            (Order::MarketAsk { .. }, Order::MarketBid { .. } | Order::LimitBid { .. }) => true,
            (Order::MarketBid { .. }, Order::MarketAsk { .. } | Order::LimitAsk { .. }) => true,
            (Order::LimitAsk { .. }, Order::MarketBid { .. }) => true,
            (Order::LimitBid { .. }, Order::MarketAsk { .. }) => true,
            (Order::LimitAsk { price: ask, .. }, Order::LimitBid { price: bid, .. })
            | (Order::LimitBid { price: bid, .. }, Order::LimitAsk { price: ask, .. }) => {
                ask <= bid
            },
            // Remaining pairs share a side
            _ => false,
        }
    }

    // ========================================================================
    // Split
    // ========================================================================

    /// Split into a filled part and a residual part.
    ///
    /// `residual_quantity` must be in `[1, quantity - 1]`. Both parts keep
    /// the issuer, timestamp, tradable, id, price and variant of the
    /// original; the input is not mutated.
    ///
    /// # Errors
    /// `InvalidQuantity` when the residual would leave either part empty.
    pub fn split(&self, residual_quantity: Quantity) -> EngineResult<(Order, Order)> {
        let filled_quantity = self
            .quantity()
            .checked_sub(residual_quantity)
            .map_err(|_| EngineError::InvalidQuantity)?;

        let mut filled = self.clone();
        filled.core_mut().quantity = filled_quantity;

        let mut residual = self.clone();
        residual.core_mut().quantity = residual_quantity;

        Ok((filled, residual))
    }
}

impl OrderCore {
    fn new(
        issuer_id: impl Into<String>,
        tradable: Tradable,
        quantity: u64,
        timestamp: u64,
    ) -> EngineResult<Self> {
        Ok(Self {
            issuer_id: Arc::new(issuer_id.into()),
            quantity: Quantity::new(quantity).map_err(|_| EngineError::InvalidQuantity)?,
            timestamp,
            tradable,
            id: OrderId::new(),
        })
    }
}
