// ============================================================================
// Domain Module
// Core order-book domain model
// ============================================================================

pub mod book;
pub mod config;
pub mod errors;
pub mod fill;
pub mod order;
pub mod ordering;

pub use book::HalfBook;
pub use config::EngineConfig;
pub use errors::{EngineError, EngineResult};
pub use fill::Fill;
pub use order::{Order, OrderCore, OrderId, Side, Tradable};
pub use ordering::{AskPriority, BidPriority, BookOrdering, PriceRank, PriorityKey};
