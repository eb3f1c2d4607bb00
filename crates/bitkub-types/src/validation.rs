//! Client-side parameter validation
//!
//! These checks reject obviously malformed input before a request is signed
//! and sent. They do not replace the exchange's own validation.

use rust_decimal::Decimal;

use crate::error::ValidationError;

/// Default page size when none is given
pub const DEFAULT_LIMIT: u32 = 10;
/// Largest page size accepted by the history endpoints
pub const MAX_LIMIT: u32 = 1000;
/// Default page when none is given
pub const DEFAULT_PAGE: u32 = 1;
/// Longest client order id accepted
pub const MAX_CLIENT_ID_LEN: usize = 100;

/// 2000-01-01T00:00:00Z in seconds
const MIN_TIMESTAMP_SECS: i64 = 946_684_800;
/// 2100-01-01T00:00:00Z in seconds
const MAX_TIMESTAMP_SECS: i64 = 4_102_444_800;

const MIN_ADDRESS_LEN: usize = 26;
const MAX_ADDRESS_LEN: usize = 62;

/// Validate an order or withdrawal amount
pub fn validate_amount(amount: Decimal, min_amount: Decimal) -> Result<Decimal, ValidationError> {
    if amount < Decimal::ZERO {
        return Err(ValidationError::InvalidAmount(format!(
            "amount cannot be negative, got {}",
            amount
        )));
    }
    if amount < min_amount {
        return Err(ValidationError::InvalidAmount(format!(
            "amount must be at least {}, got {}",
            min_amount, amount
        )));
    }
    Ok(amount)
}

/// Validate an order rate (price); must be strictly positive
pub fn validate_rate(rate: Decimal) -> Result<Decimal, ValidationError> {
    if rate <= Decimal::ZERO {
        return Err(ValidationError::InvalidRate(rate.to_string()));
    }
    Ok(rate)
}

/// Validate a page size, defaulting to [`DEFAULT_LIMIT`]
pub fn validate_limit(limit: Option<u32>, max_limit: u32) -> Result<u32, ValidationError> {
    match limit {
        None => Ok(DEFAULT_LIMIT),
        Some(value) if value == 0 || value > max_limit => Err(ValidationError::InvalidLimit {
            value,
            max: max_limit,
        }),
        Some(value) => Ok(value),
    }
}

/// Validate a page number, defaulting to [`DEFAULT_PAGE`]
pub fn validate_page(page: Option<u32>) -> Result<u32, ValidationError> {
    match page {
        None => Ok(DEFAULT_PAGE),
        Some(0) => Err(ValidationError::InvalidPage),
        Some(page) => Ok(page),
    }
}

/// Validate a unix timestamp in seconds
///
/// Accepts values between 2000-01-01 and 2100-01-01.
pub fn validate_timestamp(timestamp: Option<i64>) -> Result<Option<i64>, ValidationError> {
    match timestamp {
        None => Ok(None),
        Some(ts) if !(MIN_TIMESTAMP_SECS..=MAX_TIMESTAMP_SECS).contains(&ts) => {
            Err(ValidationError::InvalidTimestamp(ts))
        }
        Some(ts) => Ok(Some(ts)),
    }
}

/// Validate a crypto address: alphanumeric, 26 to 62 characters
pub fn validate_address(address: &str) -> Result<String, ValidationError> {
    let address = address.trim();

    if address.is_empty() {
        return Err(ValidationError::InvalidAddress("address cannot be empty"));
    }
    if !address.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidAddress(
            "address contains invalid characters",
        ));
    }
    if !(MIN_ADDRESS_LEN..=MAX_ADDRESS_LEN).contains(&address.len()) {
        return Err(ValidationError::InvalidAddress(
            "address length appears to be invalid",
        ));
    }

    Ok(address.to_string())
}

/// Validate and upper-case a currency code (2 to 5 letters)
pub fn validate_currency(currency: &str) -> Result<String, ValidationError> {
    let normalized = currency.trim().to_uppercase();
    let valid_len = (2..=5).contains(&normalized.len());

    if !valid_len || !normalized.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::InvalidCurrency(currency.to_string()));
    }
    Ok(normalized)
}

/// Validate and upper-case a blockchain network name
pub fn validate_network(network: &str) -> Result<String, ValidationError> {
    let normalized = network.trim().to_uppercase();
    if normalized.is_empty() {
        return Err(ValidationError::EmptyNetwork);
    }
    Ok(normalized)
}

/// Validate a client order id; an empty id is treated as absent
pub fn validate_client_id(client_id: Option<&str>) -> Result<Option<String>, ValidationError> {
    let Some(client_id) = client_id.map(str::trim).filter(|id| !id.is_empty()) else {
        return Ok(None);
    };

    if client_id.chars().count() > MAX_CLIENT_ID_LEN {
        return Err(ValidationError::ClientIdTooLong(client_id.chars().count()));
    }
    Ok(Some(client_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount() {
        assert_eq!(validate_amount(dec!(1.5), Decimal::ZERO).unwrap(), dec!(1.5));
        assert_eq!(validate_amount(Decimal::ZERO, Decimal::ZERO).unwrap(), Decimal::ZERO);
        assert!(validate_amount(dec!(-1), Decimal::ZERO).is_err());
        assert!(validate_amount(dec!(5), dec!(10)).is_err());
    }

    #[test]
    fn test_rate() {
        assert!(validate_rate(dec!(100)).is_ok());
        assert!(validate_rate(Decimal::ZERO).is_err());
        assert!(validate_rate(dec!(-3)).is_err());
    }

    #[test]
    fn test_limit_and_page_defaults() {
        assert_eq!(validate_limit(None, MAX_LIMIT).unwrap(), DEFAULT_LIMIT);
        assert_eq!(validate_limit(Some(1000), MAX_LIMIT).unwrap(), 1000);
        assert!(validate_limit(Some(0), MAX_LIMIT).is_err());
        assert!(validate_limit(Some(1001), MAX_LIMIT).is_err());

        assert_eq!(validate_page(None).unwrap(), DEFAULT_PAGE);
        assert_eq!(validate_page(Some(3)).unwrap(), 3);
        assert_eq!(validate_page(Some(0)), Err(ValidationError::InvalidPage));
    }

    #[test]
    fn test_timestamp_window() {
        assert_eq!(validate_timestamp(None).unwrap(), None);
        assert_eq!(validate_timestamp(Some(1_700_000_000)).unwrap(), Some(1_700_000_000));
        assert!(validate_timestamp(Some(100)).is_err());
        // Milliseconds are out of range for a seconds-based check
        assert!(validate_timestamp(Some(1_700_000_000_000)).is_err());
    }

    #[test]
    fn test_address() {
        let addr = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";
        assert_eq!(validate_address(&format!("  {} ", addr)).unwrap(), addr);
        assert!(validate_address("").is_err());
        assert!(validate_address("short").is_err());
        assert!(validate_address("0x-not-valid-address-with-dashes-here").is_err());
    }

    #[test]
    fn test_currency_and_network() {
        assert_eq!(validate_currency(" btc ").unwrap(), "BTC");
        assert!(validate_currency("B").is_err());
        assert!(validate_currency("BTC1").is_err());
        assert!(validate_currency("TOOLONG").is_err());

        assert_eq!(validate_network("eth").unwrap(), "ETH");
        assert_eq!(validate_network("  "), Err(ValidationError::EmptyNetwork));
    }

    #[test]
    fn test_client_id() {
        assert_eq!(validate_client_id(None).unwrap(), None);
        assert_eq!(validate_client_id(Some("")).unwrap(), None);
        assert_eq!(validate_client_id(Some(" abc ")).unwrap(), Some("abc".to_string()));
        let long = "x".repeat(101);
        assert!(matches!(
            validate_client_id(Some(&long)),
            Err(ValidationError::ClientIdTooLong(101))
        ));
    }
}
