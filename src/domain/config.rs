// ============================================================================
// Engine Configuration
// Validated parameters for constructing a matching engine
// ============================================================================

use crate::domain::errors::{EngineError, EngineResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for one engine instance.
///
/// Carries everything that is data rather than strategy: the instrument
/// ticker and the reference price the engine starts from. Strategies
/// (orderings, price formation, event handling) are supplied to the builder
/// as values.
///
/// # Example
/// ```
/// use cda_engine::domain::EngineConfig;
///
/// let config = EngineConfig::new("AAPL").with_reference_price(100);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Ticker of the tradable the engine is bound to
    pub symbol: String,
    /// Reference price before any trade has printed
    pub initial_reference_price: u64,
}

impl EngineConfig {
    /// Create a configuration with the default initial reference price of
    /// one tick.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            initial_reference_price: 1,
        }
    }

    /// Builder method: set the initial reference price.
    pub fn with_reference_price(mut self, price: u64) -> Self {
        self.initial_reference_price = price;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    /// `InvalidTradable` for an empty symbol, `InvalidPrice` for a zero
    /// initial reference price.
    pub fn validate(&self) -> EngineResult<()> {
        if self.symbol.is_empty() {
            return Err(EngineError::InvalidTradable);
        }
        if self.initial_reference_price == 0 {
            return Err(EngineError::InvalidPrice);
        }
        Ok(())
    }
}
