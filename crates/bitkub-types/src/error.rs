//! Error types for client-side validation

use thiserror::Error;

/// Raised when a request parameter is rejected before it reaches the exchange
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Symbol is not in `BASE_QUOTE` form
    #[error("Invalid symbol '{symbol}': {reason}")]
    InvalidSymbol { symbol: String, reason: &'static str },

    /// Amount is negative or below the minimum
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Rate is zero or negative
    #[error("Rate must be positive, got {0}")]
    InvalidRate(String),

    /// Unknown order side
    #[error("Invalid order side '{0}', expected one of: buy, sell")]
    InvalidOrderSide(String),

    /// Unknown order type
    #[error("Invalid order type '{0}', expected one of: limit, market")]
    InvalidOrderType(String),

    /// Pagination limit out of range
    #[error("Invalid limit {value}: must be between 1 and {max}")]
    InvalidLimit { value: u32, max: u32 },

    /// Page number must start at 1
    #[error("Page must be positive")]
    InvalidPage,

    /// Timestamp outside the accepted window
    #[error("Timestamp appears to be invalid: {0}")]
    InvalidTimestamp(i64),

    /// Crypto address rejected
    #[error("Invalid address: {0}")]
    InvalidAddress(&'static str),

    /// Currency code rejected
    #[error("Invalid currency '{0}'")]
    InvalidCurrency(String),

    /// Network name empty
    #[error("Network cannot be empty")]
    EmptyNetwork,

    /// Client id longer than allowed
    #[error("Client ID is too long ({0} chars)")]
    ClientIdTooLong(usize),

    /// Order identifier missing
    #[error("Order must be identified by id and side, or by hash")]
    MissingOrderId,

    /// Bank account id missing
    #[error("Bank account id cannot be empty")]
    MissingAccountId,

    /// Number has too many significant digits to send as a JSON number
    #[error("Value {0} cannot be sent without losing precision")]
    PrecisionLoss(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ValidationError::InvalidLimit { value: 5000, max: 1000 };
        assert_eq!(err.to_string(), "Invalid limit 5000: must be between 1 and 1000");

        let err = ValidationError::InvalidOrderSide("hold".to_string());
        assert!(err.to_string().contains("hold"));
    }
}
