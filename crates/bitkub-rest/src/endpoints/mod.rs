//! API endpoint implementations

pub mod account;
pub mod funding;
pub mod market;
pub mod trading;

pub use account::AccountEndpoints;
pub use funding::FundingEndpoints;
pub use market::MarketEndpoints;
pub use trading::TradingEndpoints;

use bitkub_auth::Payload;
use bitkub_types::validation::{validate_limit, MAX_LIMIT};
use bitkub_types::{Symbol, ValidationError};
use serde_json::Value;

/// Parameters holding a validated `sym`
pub(crate) fn symbol_params(symbol: &str) -> Result<Payload, ValidationError> {
    let symbol: Symbol = symbol.parse()?;
    let mut params = Payload::new();
    params.insert("sym".into(), Value::from(symbol.as_str()));
    Ok(params)
}

/// Parameters holding a validated `sym` and `lmt`
pub(crate) fn symbol_limit_params(symbol: &str, limit: Option<u32>) -> Result<Payload, ValidationError> {
    let mut params = symbol_params(symbol)?;
    params.insert("lmt".into(), Value::from(validate_limit(limit, MAX_LIMIT)?));
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_symbol_params_normalizes() {
        let params = symbol_params(" btc_thb ").unwrap();
        assert_eq!(params["sym"], json!("BTC_THB"));
    }

    #[test]
    fn test_symbol_limit_params() {
        let params = symbol_limit_params("ETH_THB", None).unwrap();
        assert_eq!(params["lmt"], json!(10));

        assert!(matches!(
            symbol_limit_params("ETH_THB", Some(0)),
            Err(ValidationError::InvalidLimit { value: 0, .. })
        ));
        assert!(symbol_limit_params("ETH", Some(5)).is_err());
    }
}
