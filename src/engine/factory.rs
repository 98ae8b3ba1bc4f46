// ============================================================================
// Engine Factory
// Creates matching engines with proper configuration
// ============================================================================

use crate::domain::{
    AskPriority, BidPriority, BookOrdering, EngineConfig, EngineResult, Tradable,
};
use crate::engine::{MatchingEngine, ReferencePricing};
use crate::interfaces::{EventHandler, PriceFormation};
use crate::numeric::Price;
use std::sync::Arc;

/// Creates a matching engine from configuration with the default
/// strategies: price-time orderings and reference pricing.
///
/// # Errors
/// Propagates configuration validation failures.
///
/// # Example
/// ```
/// use cda_engine::domain::EngineConfig;
/// use cda_engine::engine::factory::create_from_config;
/// use cda_engine::interfaces::NoOpEventHandler;
/// use std::sync::Arc;
///
/// let config = EngineConfig::new("AAPL").with_reference_price(100);
/// let engine = create_from_config(config, Arc::new(NoOpEventHandler)).unwrap();
/// assert_eq!(engine.tradable().symbol(), "AAPL");
/// ```
pub fn create_from_config(
    config: EngineConfig,
    event_handler: Arc<dyn EventHandler>,
) -> EngineResult<MatchingEngine> {
    MatchingEngineBuilder::from_config(config).build(event_handler)
}

/// Builder for matching engines with a fluent API.
///
/// Defaults: price-time priority on both sides, reference pricing, initial
/// reference price of one tick.
///
/// # Example
/// ```
/// use cda_engine::engine::factory::MatchingEngineBuilder;
/// use cda_engine::interfaces::NoOpEventHandler;
/// use std::sync::Arc;
///
/// let engine = MatchingEngineBuilder::new("BTC-USD")
///     .with_reference_price(50_000)
///     .build(Arc::new(NoOpEventHandler))
///     .unwrap();
/// assert_eq!(engine.reference_price().get(), 50_000);
/// ```
pub struct MatchingEngineBuilder {
    config: EngineConfig,
    tradable: Option<Tradable>,
    ask_ordering: Box<dyn BookOrdering>,
    bid_ordering: Box<dyn BookOrdering>,
    pricing: Box<dyn PriceFormation>,
}

impl MatchingEngineBuilder {
    /// Create a builder for the specified instrument.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self::from_config(EngineConfig::new(symbol))
    }

    /// Create a builder from an existing configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self {
            config,
            tradable: None,
            ask_ordering: Box::new(AskPriority),
            bid_ordering: Box::new(BidPriority),
            pricing: Box::new(ReferencePricing),
        }
    }

    /// Set the initial reference price.
    pub fn with_reference_price(mut self, price: u64) -> Self {
        self.config.initial_reference_price = price;
        self
    }

    /// Bind the engine to an existing tradable identity instead of minting
    /// a fresh one from the configured symbol.
    pub fn with_tradable(mut self, tradable: Tradable) -> Self {
        self.tradable = Some(tradable);
        self
    }

    /// Override the ask-side ordering.
    pub fn with_ask_ordering(mut self, ordering: Box<dyn BookOrdering>) -> Self {
        self.ask_ordering = ordering;
        self
    }

    /// Override the bid-side ordering.
    pub fn with_bid_ordering(mut self, ordering: Box<dyn BookOrdering>) -> Self {
        self.bid_ordering = ordering;
        self
    }

    /// Override the price-formation strategy.
    pub fn with_pricing(mut self, pricing: Box<dyn PriceFormation>) -> Self {
        self.pricing = pricing;
        self
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build the matching engine.
    ///
    /// # Errors
    /// Propagates configuration validation failures.
    pub fn build(self, event_handler: Arc<dyn EventHandler>) -> EngineResult<MatchingEngine> {
        self.config.validate()?;

        let tradable = self
            .tradable
            .unwrap_or_else(|| Tradable::new(self.config.symbol.clone()));
        // Validated non-zero above
        let reference_price = Price::new(self.config.initial_reference_price)
            .map_err(|_| crate::domain::EngineError::InvalidPrice)?;

        Ok(MatchingEngine::new(
            tradable,
            self.ask_ordering,
            self.bid_ordering,
            reference_price,
            self.pricing,
            event_handler,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EngineError;
    use crate::interfaces::NoOpEventHandler;

    #[test]
    fn test_create_from_config() {
        let config = EngineConfig::new("AAPL").with_reference_price(100);
        let engine = create_from_config(config, Arc::new(NoOpEventHandler)).unwrap();
        assert_eq!(engine.tradable().symbol(), "AAPL");
        assert_eq!(engine.reference_price().get(), 100);
    }

    #[test]
    fn test_create_rejects_invalid_config() {
        let config = EngineConfig::new("");
        assert_eq!(
            create_from_config(config, Arc::new(NoOpEventHandler)).err(),
            Some(EngineError::InvalidTradable)
        );

        let config = EngineConfig::new("AAPL").with_reference_price(0);
        assert_eq!(
            create_from_config(config, Arc::new(NoOpEventHandler)).err(),
            Some(EngineError::InvalidPrice)
        );
    }

    #[test]
    fn test_builder_defaults() {
        let engine = MatchingEngineBuilder::new("BTC-USD")
            .build(Arc::new(NoOpEventHandler))
            .unwrap();
        assert_eq!(engine.tradable().symbol(), "BTC-USD");
        assert_eq!(engine.reference_price().get(), 1);
    }

    #[test]
    fn test_builder_with_tradable() {
        let tradable = Tradable::new("ETH-USD");
        let engine = MatchingEngineBuilder::new("ETH-USD")
            .with_tradable(tradable.clone())
            .with_reference_price(3_000)
            .build(Arc::new(NoOpEventHandler))
            .unwrap();
        assert_eq!(engine.tradable(), &tradable);
    }

    #[test]
    fn test_builder_config_inspection() {
        let builder = MatchingEngineBuilder::new("AAPL").with_reference_price(42);
        assert_eq!(builder.get_config().initial_reference_price, 42);
    }
}
