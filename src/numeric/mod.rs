// ============================================================================
// Numeric Module
// Integer tick values for prices and quantities
// ============================================================================

//! Positive integer tick values.
//!
//! Prices and quantities are whole numbers of ticks/units and are positive
//! by construction, which keeps the "no zero-quantity order, no non-positive
//! price" invariants out of the matching code entirely.

mod errors;
mod tick;

pub use errors::{NumericError, NumericResult};
pub use tick::{Price, Quantity};
