// ============================================================================
// Reference Pricing
// Default CDA price formation: resting limit first, reference as fallback
// ============================================================================

use crate::domain::{Order, Side};
use crate::interfaces::{PriceFormation, PricingContext};
use crate::numeric::Price;
use std::cmp;

/// Default continuous double-auction pricing policy.
///
/// - A resting limit order sets the price: the incoming aggressor takes the
///   resting price, so any price improvement accrues to the aggressor.
/// - An incoming limit against a resting market order executes at the limit
///   price, clamped by the reference so the market side is not filled at a
///   price the book could not clear: ask side `max(reference, price)`, bid
///   side `min(reference, price)`.
/// - Market against market executes at `min(best limit ask, reference)`
///   when a limit ask rests, otherwise at the reference price.
///
/// # Example
/// ```text
/// Book: MarketBid resting, reference = 60
/// Incoming: LimitAsk @ 50
/// Executes at max(60, 50) = 60
/// ```
pub struct ReferencePricing;

impl PriceFormation for ReferencePricing {
    fn execution_price(&self, incoming: &Order, resting: &Order, ctx: &PricingContext) -> Price {
        match (incoming.price(), resting.price()) {
            // Resting limit sets the price, whether the incoming is a limit
            // or a market order.
            (_, Some(resting_price)) => resting_price,

            // Incoming limit against a resting market order.
            (Some(incoming_price), None) => match incoming.side() {
                Side::Ask => cmp::max(ctx.reference_price, incoming_price),
                Side::Bid => cmp::min(ctx.reference_price, incoming_price),
            },

            // Market against market: anchor on the best limit ask if any.
            (None, None) => match ctx.ask_anchor {
                Some(anchor) => cmp::min(anchor, ctx.reference_price),
                None => ctx.reference_price,
            },
        }
    }

    fn name(&self) -> &str {
        "ReferencePricing"
    }
}
