//! Types for Bitkub REST API requests and responses

use bitkub_auth::Payload;
use bitkub_types::validation::{
    validate_address, validate_amount, validate_client_id, validate_currency, validate_limit,
    validate_network, validate_page, validate_rate, MAX_LIMIT,
};
use bitkub_types::{OrderSide, OrderType, Symbol, ValidationError};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

// ============================================================================
// Parameter helpers
// ============================================================================

/// Decimal places the exchange accepts for amounts and rates
pub const WIRE_DECIMALS: u32 = 8;

/// Render a decimal as a JSON number
///
/// The value is first rounded to [`WIRE_DECIMALS`] places (banker's
/// rounding). Integral values stay integers (`1`, not `1.0`) so the signed
/// body matches what a caller would write by hand. Fractional values are sent
/// as `f64`; a value whose rounded digits do not survive that conversion is
/// rejected with [`ValidationError::PrecisionLoss`] rather than altered.
pub fn decimal_to_json(value: Decimal) -> Result<Value, ValidationError> {
    let value = value.round_dp(WIRE_DECIMALS).normalize();
    if value.fract().is_zero() {
        if let Some(int) = value.to_i64() {
            return Ok(Value::from(int));
        }
    }

    let text = value.to_string();
    let float = text
        .parse::<f64>()
        .ok()
        .filter(|f| f.to_string() == text)
        .and_then(Number::from_f64);
    float
        .map(Value::Number)
        .ok_or(ValidationError::PrecisionLoss(text))
}

fn flexible_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(v) => Ok(v),
        Raw::Float(v) => Ok(v as i64),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn flexible_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

// ============================================================================
// Market Data Types
// ============================================================================

/// One entry of `/api/status`
#[derive(Debug, Clone, Deserialize)]
pub struct SystemStatus {
    /// Endpoint group name
    pub name: String,
    /// "ok" when operational
    pub status: String,
    /// Extra information (usually empty)
    #[serde(default)]
    pub message: String,
}

impl SystemStatus {
    /// Check if this endpoint group is operational
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

/// Symbol listing from `/api/market/symbols`
#[derive(Debug, Clone, Deserialize)]
pub struct SymbolInfo {
    /// Numeric symbol id
    pub id: i64,
    /// Symbol name
    pub symbol: String,
    /// Description
    #[serde(default)]
    pub info: String,
}

/// Ticker entry from `/api/v3/market/ticker`
#[derive(Debug, Clone, Deserialize)]
pub struct Ticker {
    /// Symbol name
    pub symbol: String,
    /// Last traded rate
    pub last: Decimal,
    /// Best ask
    pub lowest_ask: Decimal,
    /// Best bid
    pub highest_bid: Decimal,
    /// 24h change in percent
    pub percent_change: Decimal,
    /// 24h base volume
    pub base_volume: Decimal,
    /// 24h quote volume
    pub quote_volume: Decimal,
    /// 24h high
    #[serde(rename = "high_24_hr")]
    pub high_24hr: Decimal,
    /// 24h low
    #[serde(rename = "low_24_hr")]
    pub low_24hr: Decimal,
}

impl Ticker {
    /// Get the mid price (average of bid and ask)
    pub fn mid_price(&self) -> Decimal {
        (self.lowest_ask + self.highest_bid) / Decimal::TWO
    }

    /// Get the absolute spread
    pub fn spread(&self) -> Decimal {
        self.lowest_ask - self.highest_bid
    }

    /// Get spread in basis points
    pub fn spread_bps(&self) -> Option<Decimal> {
        let mid = self.mid_price();
        if mid.is_zero() {
            return None;
        }
        Some(self.spread() / mid * Decimal::from(10000))
    }
}

/// Depth snapshot from `/api/v3/market/depth`
#[derive(Debug, Clone, Deserialize)]
pub struct Depth {
    /// Ask levels `[rate, amount]`, best first
    pub asks: Vec<[Decimal; 2]>,
    /// Bid levels `[rate, amount]`, best first
    pub bids: Vec<[Decimal; 2]>,
}

impl Depth {
    /// Get the best ask rate
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|level| level[0])
    }

    /// Get the best bid rate
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|level| level[0])
    }

    /// Get the spread
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()? - self.best_bid()?)
    }
}

// ============================================================================
// Account Types
// ============================================================================

/// Balance for one currency from `/api/v3/market/balances`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Balance {
    /// Free to trade or withdraw
    pub available: Decimal,
    /// Held by open orders or pending withdrawals
    pub reserved: Decimal,
}

impl Balance {
    /// Available plus reserved
    pub fn total(&self) -> Decimal {
        self.available + self.reserved
    }
}

// ============================================================================
// Trading Types
// ============================================================================

/// Order placement request
///
/// For bids `amount` is the quote amount to spend (e.g. THB); for asks it is
/// the base amount to sell (e.g. BTC).
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    /// Trading pair
    pub symbol: Symbol,
    /// Buy or sell
    pub side: OrderSide,
    /// Order amount
    pub amount: Decimal,
    /// Limit rate (ignored for market orders)
    pub rate: Option<Decimal>,
    /// Limit or market
    pub order_type: OrderType,
    /// Caller-chosen reference
    pub client_id: Option<String>,
    /// Reject instead of taking liquidity
    pub post_only: bool,
}

impl OrderRequest {
    /// Create a limit order
    pub fn limit(symbol: impl Into<Symbol>, side: OrderSide, amount: Decimal, rate: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            amount,
            rate: Some(rate),
            order_type: OrderType::Limit,
            client_id: None,
            post_only: false,
        }
    }

    /// Create a market order
    pub fn market(symbol: impl Into<Symbol>, side: OrderSide, amount: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            amount,
            rate: None,
            order_type: OrderType::Market,
            client_id: None,
            post_only: false,
        }
    }

    /// Attach a client id
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Mark the order post-only
    pub fn post_only(mut self) -> Self {
        self.post_only = true;
        self
    }

    /// Validate and build the request body
    pub fn to_params(&self) -> Result<Payload, ValidationError> {
        let symbol: Symbol = self.symbol.as_str().parse()?;
        let amount = validate_amount(self.amount, Decimal::ZERO)?;
        let rate = match self.order_type {
            OrderType::Limit => {
                validate_rate(self.rate.ok_or(ValidationError::InvalidRate("missing".into()))?)?
            }
            // Market orders are sent with rate 0
            OrderType::Market => Decimal::ZERO,
        };
        let client_id = validate_client_id(self.client_id.as_deref())?;

        let mut params = Payload::new();
        params.insert("sym".into(), Value::from(symbol.as_str()));
        params.insert("amt".into(), decimal_to_json(amount)?);
        params.insert("rat".into(), decimal_to_json(rate)?);
        params.insert("typ".into(), Value::from(self.order_type.as_str()));
        if let Some(client_id) = client_id {
            params.insert("client_id".into(), Value::from(client_id));
        }
        if self.post_only {
            params.insert("post_only".into(), Value::Bool(true));
        }
        Ok(params)
    }
}

/// Result of a place-bid / place-ask call
#[derive(Debug, Clone, Deserialize)]
pub struct OrderResult {
    /// Order id
    #[serde(deserialize_with = "flexible_string")]
    pub id: String,
    /// Order hash (older API versions)
    #[serde(default)]
    pub hash: Option<String>,
    /// Order type
    pub typ: OrderType,
    /// Amount
    pub amt: Decimal,
    /// Rate
    pub rat: Decimal,
    /// Fee
    pub fee: Decimal,
    /// Fee credit used
    #[serde(default)]
    pub cre: Decimal,
    /// Amount to receive
    pub rec: Decimal,
    /// Creation time
    #[serde(deserialize_with = "flexible_i64")]
    pub ts: i64,
    /// Client id echoed back
    #[serde(default)]
    pub ci: Option<String>,
}

/// Reference to an existing order, for cancel and lookup calls
#[derive(Debug, Clone, PartialEq)]
pub enum OrderRef {
    /// Identified by symbol, id and side
    Id {
        symbol: Symbol,
        id: String,
        side: OrderSide,
    },
    /// Identified by order hash
    Hash(String),
}

impl OrderRef {
    /// Reference an order by symbol, id and side
    pub fn by_id(symbol: impl Into<Symbol>, id: impl Into<String>, side: OrderSide) -> Self {
        Self::Id {
            symbol: symbol.into(),
            id: id.into(),
            side,
        }
    }

    /// Reference an order by hash
    pub fn by_hash(hash: impl Into<String>) -> Self {
        Self::Hash(hash.into())
    }

    /// Validate and build request parameters
    pub fn to_params(&self) -> Result<Payload, ValidationError> {
        let mut params = Payload::new();
        match self {
            Self::Id { symbol, id, side } => {
                if id.trim().is_empty() {
                    return Err(ValidationError::MissingOrderId);
                }
                let symbol: Symbol = symbol.as_str().parse()?;
                params.insert("sym".into(), Value::from(symbol.as_str()));
                params.insert("id".into(), Value::from(id.trim()));
                params.insert("sd".into(), Value::from(side.as_str()));
            }
            Self::Hash(hash) => {
                if hash.trim().is_empty() {
                    return Err(ValidationError::MissingOrderId);
                }
                params.insert("hash".into(), Value::from(hash.trim()));
            }
        }
        Ok(params)
    }
}

// ============================================================================
// Funding Types
// ============================================================================

/// Page selection for history endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (defaults to 1)
    pub page: Option<u32>,
    /// Page size (defaults to 10, at most 1000)
    pub limit: Option<u32>,
}

impl Pagination {
    /// Select a page and page size
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// Validate and write `p` / `lmt` into the parameters
    pub fn apply(&self, params: &mut Payload) -> Result<(), ValidationError> {
        params.insert("p".into(), Value::from(validate_page(self.page)?));
        params.insert("lmt".into(), Value::from(validate_limit(self.limit, MAX_LIMIT)?));
        Ok(())
    }
}

/// Crypto withdrawal request
#[derive(Debug, Clone, PartialEq)]
pub struct WithdrawRequest {
    /// Currency code, e.g. "BTC"
    pub currency: String,
    /// Amount to withdraw
    pub amount: Decimal,
    /// Destination address
    pub address: String,
    /// Memo / tag, for networks that need one
    pub memo: Option<String>,
    /// Network, e.g. "BTC" or "ETH"
    pub network: String,
}

impl WithdrawRequest {
    /// Create a withdrawal request
    pub fn new(
        currency: impl Into<String>,
        amount: Decimal,
        address: impl Into<String>,
        network: impl Into<String>,
    ) -> Self {
        Self {
            currency: currency.into(),
            amount,
            address: address.into(),
            memo: None,
            network: network.into(),
        }
    }

    /// Attach a memo
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// Validate and build the request body
    ///
    /// `include_network` is false for internal transfers, which have no
    /// network field.
    pub fn to_params(&self, include_network: bool) -> Result<Payload, ValidationError> {
        let mut params = Payload::new();
        params.insert("cur".into(), Value::from(validate_currency(&self.currency)?));
        params.insert(
            "amt".into(),
            decimal_to_json(validate_amount(self.amount, Decimal::ZERO)?)?,
        );
        params.insert("adr".into(), Value::from(validate_address(&self.address)?));
        if let Some(memo) = self.memo.as_deref().filter(|m| !m.is_empty()) {
            params.insert("mem".into(), Value::from(memo));
        }
        if include_network {
            params.insert("net".into(), Value::from(validate_network(&self.network)?));
        }
        Ok(params)
    }
}
