// ============================================================================
// Numeric Errors
// Error types for tick arithmetic on prices and quantities
// ============================================================================

use std::fmt;

/// Errors that can occur constructing or combining tick values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Value must be at least one tick
    NotPositive,
    /// Result exceeded u64::MAX
    Overflow,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NotPositive => {
                write!(f, "value must be a positive number of ticks")
            },
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: result exceeded maximum value")
            },
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            NumericError::NotPositive.to_string(),
            "value must be a positive number of ticks"
        );
        assert_eq!(
            NumericError::Overflow.to_string(),
            "arithmetic overflow: result exceeded maximum value"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(NumericError::NotPositive, NumericError::NotPositive);
        assert_ne!(NumericError::NotPositive, NumericError::Overflow);
    }
}
