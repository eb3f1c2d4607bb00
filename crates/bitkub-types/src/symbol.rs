//! Trading pair symbols (BTC_THB format)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Trading pair symbol in Bitkub's `BASE_QUOTE` form
///
/// Parsing trims surrounding whitespace and upper-cases the input, so
/// `" btc_thb "` and `"BTC_THB"` produce the same symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// BTC/THB trading pair
    pub const BTC_THB: &'static str = "BTC_THB";
    /// ETH/THB trading pair
    pub const ETH_THB: &'static str = "ETH_THB";
    /// USDT/THB trading pair
    pub const USDT_THB: &'static str = "USDT_THB";
    /// XRP/THB trading pair
    pub const XRP_THB: &'static str = "XRP_THB";

    /// Create a symbol without validation
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the symbol as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the base currency (e.g., "BTC" from "BTC_THB")
    pub fn base(&self) -> Option<&str> {
        self.0.split('_').next()
    }

    /// Get the quote currency (e.g., "THB" from "BTC_THB")
    pub fn quote(&self) -> Option<&str> {
        self.0.split('_').nth(1)
    }
}

impl FromStr for Symbol {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        let invalid = |reason| ValidationError::InvalidSymbol {
            symbol: s.to_string(),
            reason,
        };

        if normalized.is_empty() {
            return Err(invalid("symbol is empty"));
        }
        if !normalized.contains('_') {
            return Err(invalid("must be in format 'BASE_QUOTE'"));
        }

        let parts: Vec<&str> = normalized.split('_').collect();
        if parts.len() != 2 {
            return Err(invalid("must have exactly one underscore"));
        }
        if parts[0].is_empty() || parts[1].is_empty() {
            return Err(invalid("base and quote must be non-empty"));
        }

        Ok(Self(normalized))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_parse() {
        let symbol: Symbol = "BTC_THB".parse().unwrap();
        assert_eq!(symbol.as_str(), "BTC_THB");
        assert_eq!(symbol.base(), Some("BTC"));
        assert_eq!(symbol.quote(), Some("THB"));
    }

    #[test]
    fn test_symbol_normalizes() {
        let symbol: Symbol = "  eth_thb ".parse().unwrap();
        assert_eq!(symbol.as_str(), Symbol::ETH_THB);
    }

    #[test]
    fn test_symbol_parse_error() {
        assert!("BTCTHB".parse::<Symbol>().is_err());
        assert!("_THB".parse::<Symbol>().is_err());
        assert!("BTC_".parse::<Symbol>().is_err());
        assert!("BTC_THB_X".parse::<Symbol>().is_err());
        assert!("   ".parse::<Symbol>().is_err());
    }

    #[test]
    fn test_symbol_serde() {
        let symbol = Symbol::new("USDT_THB");
        let json = serde_json::to_string(&symbol).unwrap();
        assert_eq!(json, "\"USDT_THB\"");

        let parsed: Symbol = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, symbol);
    }
}
