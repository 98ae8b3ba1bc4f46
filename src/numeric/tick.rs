// ============================================================================
// Tick Values
// Positive integer prices and quantities
// ============================================================================

use super::errors::{NumericError, NumericResult};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A limit or execution price, in integer ticks.
///
/// Always at least one tick: the zero price is unrepresentable, so a
/// reference price can never be driven to or below zero by an update.
///
/// # Example
/// ```
/// use cda_engine::numeric::Price;
///
/// let price = Price::new(50).unwrap();
/// assert_eq!(price.get(), 50);
/// assert!(Price::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct Price(u64);

impl Price {
    /// The smallest representable price.
    pub const MIN: Price = Price(1);

    /// Create a price from a tick count.
    ///
    /// # Errors
    /// Returns `NotPositive` when `ticks` is zero.
    #[inline]
    pub fn new(ticks: u64) -> NumericResult<Self> {
        if ticks == 0 {
            Err(NumericError::NotPositive)
        } else {
            Ok(Self(ticks))
        }
    }

    /// The raw tick count.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Difference to another price, `None` when `other` is greater.
    #[inline]
    pub fn checked_sub(self, other: Price) -> Option<u64> {
        self.0.checked_sub(other.0)
    }

    /// Midpoint between two prices, rounded down.
    #[inline]
    pub fn midpoint(self, other: Price) -> Price {
        // Average of two positive values stays positive.
        Price(self.0 / 2 + other.0 / 2 + (self.0 % 2 + other.0 % 2) / 2)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An order quantity, in integer units of the tradable.
///
/// Always at least one unit. An order whose residual would reach zero is
/// dropped rather than carried, so checked subtraction treats a zero result
/// as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct Quantity(u64);

impl Quantity {
    /// The smallest representable quantity.
    pub const MIN: Quantity = Quantity(1);

    /// Create a quantity from a unit count.
    ///
    /// # Errors
    /// Returns `NotPositive` when `units` is zero.
    #[inline]
    pub fn new(units: u64) -> NumericResult<Self> {
        if units == 0 {
            Err(NumericError::NotPositive)
        } else {
            Ok(Self(units))
        }
    }

    /// The raw unit count.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The smaller of two quantities.
    #[inline]
    pub fn min(self, other: Quantity) -> Quantity {
        if other.0 < self.0 {
            other
        } else {
            self
        }
    }

    /// Checked addition.
    ///
    /// # Errors
    /// Returns `Overflow` when the sum exceeds `u64::MAX`.
    #[inline]
    pub fn checked_add(self, other: Quantity) -> NumericResult<Quantity> {
        self.0
            .checked_add(other.0)
            .map(Quantity)
            .ok_or(NumericError::Overflow)
    }

    /// Checked subtraction, rejecting results that are not positive.
    ///
    /// # Errors
    /// Returns `NotPositive` when `other >= self`.
    #[inline]
    pub fn checked_sub(self, other: Quantity) -> NumericResult<Quantity> {
        if other.0 >= self.0 {
            Err(NumericError::NotPositive)
        } else {
            Ok(Quantity(self.0 - other.0))
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_rejects_zero() {
        assert_eq!(Price::new(0), Err(NumericError::NotPositive));
        assert_eq!(Price::new(1), Ok(Price::MIN));
    }

    #[test]
    fn test_price_ordering() {
        let low = Price::new(50).unwrap();
        let high = Price::new(55).unwrap();
        assert!(low < high);
        assert_eq!(low.checked_sub(high), None);
        assert_eq!(high.checked_sub(low), Some(5));
    }

    #[test]
    fn test_price_midpoint() {
        let a = Price::new(50).unwrap();
        let b = Price::new(56).unwrap();
        assert_eq!(a.midpoint(b), Price::new(53).unwrap());
        // Odd sum rounds down
        let c = Price::new(51).unwrap();
        assert_eq!(a.midpoint(c), Price::new(50).unwrap());
    }

    #[test]
    fn test_quantity_rejects_zero() {
        assert_eq!(Quantity::new(0), Err(NumericError::NotPositive));
    }

    #[test]
    fn test_quantity_min() {
        let small = Quantity::new(4).unwrap();
        let large = Quantity::new(10).unwrap();
        assert_eq!(small.min(large), small);
        assert_eq!(large.min(small), small);
        assert_eq!(small.min(small), small);
    }

    #[test]
    fn test_quantity_checked_sub() {
        let a = Quantity::new(10).unwrap();
        let b = Quantity::new(4).unwrap();
        assert_eq!(a.checked_sub(b), Ok(Quantity::new(6).unwrap()));
        // Zero residual is not a quantity
        assert_eq!(a.checked_sub(a), Err(NumericError::NotPositive));
        assert_eq!(b.checked_sub(a), Err(NumericError::NotPositive));
    }

    #[test]
    fn test_quantity_checked_add() {
        let a = Quantity::new(u64::MAX).unwrap();
        assert_eq!(a.checked_add(Quantity::MIN), Err(NumericError::Overflow));
        assert_eq!(
            Quantity::new(3).unwrap().checked_add(Quantity::new(4).unwrap()),
            Ok(Quantity::new(7).unwrap())
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::new(50).unwrap().to_string(), "50");
        assert_eq!(Quantity::new(10).unwrap().to_string(), "10");
    }
}
