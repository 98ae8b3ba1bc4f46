// ============================================================================
// Engine Module
// The matching engine and its default strategies
// ============================================================================

pub mod factory;
pub mod matching_engine;
pub mod reference_pricing;

pub use factory::{create_from_config, MatchingEngineBuilder};
pub use matching_engine::MatchingEngine;
pub use reference_pricing::ReferencePricing;
