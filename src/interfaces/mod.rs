// ============================================================================
// Interfaces Module
// Contracts between the engine and its collaborators
// ============================================================================

pub mod event_handler;
pub mod price_formation;

pub use event_handler::{EventHandler, LoggingEventHandler, NoOpEventHandler, OrderEvent};
pub use price_formation::{PriceFormation, PricingContext};
