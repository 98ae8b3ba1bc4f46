// ============================================================================
// Price Formation Interface
// Defines the contract for pluggable execution pricing
// ============================================================================

use crate::domain::Order;
use crate::numeric::Price;

/// Market state a pricing strategy may consult.
#[derive(Debug, Clone, Copy)]
pub struct PricingContext {
    /// Last traded price (or the engine's initial value)
    pub reference_price: Price,
    /// Best resting limit ask, used as an anchor when neither order
    /// carries a price
    pub ask_anchor: Option<Price>,
}

/// Strategy pattern interface for execution pricing.
///
/// Given the incoming and resting order being matched and the current
/// market context, choose the price the trade executes at. Implementations
/// must be pure: no side effects, same inputs give the same price.
pub trait PriceFormation: Send + Sync {
    /// Choose the execution price for a match.
    ///
    /// Only called for order pairs that cross, so `incoming` and `resting`
    /// are on opposite sides of the same tradable.
    fn execution_price(&self, incoming: &Order, resting: &Order, ctx: &PricingContext) -> Price;

    /// Get the strategy name for logging/metrics.
    fn name(&self) -> &str;
}
