//! Method, OrderSide, OrderType, OrderStatus and related enums

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// HTTP method used by Bitkub endpoints
///
/// The upper-case name is part of the signed payload, so `as_str` must
/// match the verb on the wire exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// Read-only call, parameters travel in the query string
    Get,
    /// Mutating call, parameters travel as a JSON body
    Post,
}

impl Method {
    /// Returns the method name as used on the wire and in signatures
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }

    /// Returns true if parameters belong in the request body
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Bid
    Buy,
    /// Ask
    Sell,
}

impl OrderSide {
    /// Returns the side as used in API parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }

    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderSide {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            _ => Err(ValidationError::InvalidOrderSide(s.to_string())),
        }
    }
}

/// Order types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Executes at the given rate or better
    #[default]
    Limit,
    /// Executes immediately at the best available rate
    Market,
}

impl OrderType {
    /// Returns the order type as used in API parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Limit => "limit",
            Self::Market => "market",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "limit" => Ok(Self::Limit),
            "market" => Ok(Self::Market),
            _ => Err(ValidationError::InvalidOrderType(s.to_string())),
        }
    }
}

/// Order status reported by order-info and history endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Partial,
    Filled,
    Cancelled,
}

impl OrderStatus {
    /// Returns true if the order can no longer change
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Filled | Self::Cancelled)
    }
}

/// Candle resolution for the TradingView history endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeResolution {
    #[serde(rename = "1")]
    M1,
    #[serde(rename = "5")]
    M5,
    #[serde(rename = "15")]
    M15,
    #[serde(rename = "30")]
    M30,
    #[serde(rename = "60")]
    H1,
    #[serde(rename = "240")]
    H4,
    #[serde(rename = "1D")]
    D1,
}

impl TimeResolution {
    /// Returns the resolution as used in API parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::M1 => "1",
            Self::M5 => "5",
            Self::M15 => "15",
            Self::M30 => "30",
            Self::H1 => "60",
            Self::H4 => "240",
            Self::D1 => "1D",
        }
    }
}

impl fmt::Display for TimeResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deposit / withdrawal status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Processing,
    Complete,
    Failed,
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_wire_names() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
        assert!(Method::Post.has_body());
        assert!(!Method::Get.has_body());
    }

    #[test]
    fn test_order_side_parse() {
        assert_eq!(" BUY ".parse::<OrderSide>().unwrap(), OrderSide::Buy);
        assert_eq!("sell".parse::<OrderSide>().unwrap(), OrderSide::Sell);
        assert!("hold".parse::<OrderSide>().is_err());
        assert_eq!(OrderSide::Buy.opposite(), OrderSide::Sell);
    }

    #[test]
    fn test_order_type_parse() {
        assert_eq!("Limit".parse::<OrderType>().unwrap(), OrderType::Limit);
        assert_eq!("market".parse::<OrderType>().unwrap(), OrderType::Market);
        assert!(matches!(
            "stop".parse::<OrderType>(),
            Err(ValidationError::InvalidOrderType(_))
        ));
    }

    #[test]
    fn test_enum_serde() {
        assert_eq!(serde_json::to_string(&OrderSide::Sell).unwrap(), "\"sell\"");
        assert_eq!(serde_json::to_string(&TimeResolution::D1).unwrap(), "\"1D\"");

        let status: OrderStatus = serde_json::from_str("\"filled\"").unwrap();
        assert!(status.is_final());

        let tx: TransactionStatus = serde_json::from_str("\"processing\"").unwrap();
        assert_eq!(tx, TransactionStatus::Processing);
    }
}
