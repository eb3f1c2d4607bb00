//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use bitkub_auth::Payload;
use bitkub_types::validation::validate_timestamp;
use bitkub_types::{Method, Symbol, TimeResolution, ValidationError};
use serde_json::Value;
use tracing::{debug, instrument};

use super::{symbol_limit_params, symbol_params};
use crate::client::{BitkubRestClient, SERVER_TIME_PATH};
use crate::error::RestResult;
use crate::types::{Depth, SymbolInfo, SystemStatus, Ticker};

const STATUS: &str = "/api/status";
const SYMBOLS: &str = "/api/market/symbols";
const TICKER: &str = "/api/v3/market/ticker";
const TRADES: &str = "/api/v3/market/trades";
const BIDS: &str = "/api/v3/market/bids";
const ASKS: &str = "/api/v3/market/asks";
const BOOKS: &str = "/api/market/books";
const DEPTH: &str = "/api/v3/market/depth";
const TRADING_VIEW_HISTORY: &str = "/tradingview/history";

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    client: &'a BitkubRestClient,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(client: &'a BitkubRestClient) -> Self {
        Self { client }
    }

    /// Get endpoint group status
    #[instrument(skip(self))]
    pub async fn get_status(&self) -> RestResult<Vec<SystemStatus>> {
        debug!("Fetching system status");
        self.client.send_public_as(Method::Get, STATUS, Payload::new()).await
    }

    /// Get server time in milliseconds
    #[instrument(skip(self))]
    pub async fn get_server_time(&self) -> RestResult<i64> {
        debug!("Fetching server time via {}", SERVER_TIME_PATH);
        self.client.fetch_server_time().await
    }

    /// Get all listed symbols
    #[instrument(skip(self))]
    pub async fn get_symbols(&self) -> RestResult<Vec<SymbolInfo>> {
        debug!("Fetching symbols");
        self.client.send_public_as(Method::Get, SYMBOLS, Payload::new()).await
    }

    /// Get tickers
    ///
    /// # Arguments
    /// * `symbol` - Trading pair (e.g., "BTC_THB"); all pairs when `None`
    #[instrument(skip(self))]
    pub async fn get_ticker(&self, symbol: Option<&str>) -> RestResult<Vec<Ticker>> {
        let params = match symbol {
            Some(symbol) => symbol_params(symbol)?,
            None => Payload::new(),
        };
        debug!("Fetching ticker");
        self.client.send_public_as(Method::Get, TICKER, params).await
    }

    /// Get recent trades
    ///
    /// # Arguments
    /// * `symbol` - Trading pair
    /// * `limit` - Number of trades (default 10, max 1000)
    #[instrument(skip(self))]
    pub async fn get_trades(&self, symbol: &str, limit: Option<u32>) -> RestResult<Value> {
        let params = symbol_limit_params(symbol, limit)?;
        debug!("Fetching trades for {}", symbol);
        self.client.send_public(Method::Get, TRADES, params).await
    }

    /// Get open buy orders
    #[instrument(skip(self))]
    pub async fn get_bids(&self, symbol: &str, limit: Option<u32>) -> RestResult<Value> {
        let params = symbol_limit_params(symbol, limit)?;
        debug!("Fetching bids for {}", symbol);
        self.client.send_public(Method::Get, BIDS, params).await
    }

    /// Get open sell orders
    #[instrument(skip(self))]
    pub async fn get_asks(&self, symbol: &str, limit: Option<u32>) -> RestResult<Value> {
        let params = symbol_limit_params(symbol, limit)?;
        debug!("Fetching asks for {}", symbol);
        self.client.send_public(Method::Get, ASKS, params).await
    }

    /// Get bids and asks together
    #[instrument(skip(self))]
    pub async fn get_books(&self, symbol: &str, limit: Option<u32>) -> RestResult<Value> {
        let params = symbol_limit_params(symbol, limit)?;
        debug!("Fetching order book for {}", symbol);
        self.client.send_public(Method::Get, BOOKS, params).await
    }

    /// Get aggregated depth
    ///
    /// # Arguments
    /// * `symbol` - Trading pair
    /// * `limit` - Number of levels per side (default 10, max 1000)
    #[instrument(skip(self))]
    pub async fn get_depth(&self, symbol: &str, limit: Option<u32>) -> RestResult<Depth> {
        let params = symbol_limit_params(symbol, limit)?;
        debug!("Fetching depth for {}", symbol);
        self.client.send_public_as(Method::Get, DEPTH, params).await
    }

    /// Get candle history in TradingView's format
    ///
    /// # Arguments
    /// * `symbol` - Trading pair (e.g., "BTC_THB")
    /// * `resolution` - Candle size
    /// * `from` / `to` - Range in unix seconds
    #[instrument(skip(self))]
    pub async fn get_trading_view_history(
        &self,
        symbol: &str,
        resolution: TimeResolution,
        from: i64,
        to: i64,
    ) -> RestResult<Value> {
        let symbol: Symbol = symbol.parse()?;
        validate_timestamp(Some(from))?;
        validate_timestamp(Some(to))?;
        if from > to {
            return Err(ValidationError::InvalidTimestamp(from).into());
        }

        let mut params = Payload::new();
        params.insert("symbol".into(), Value::from(symbol.as_str()));
        params.insert("resolution".into(), Value::from(resolution.as_str()));
        params.insert("from".into(), Value::from(from));
        params.insert("to".into(), Value::from(to));

        debug!("Fetching {} candles for {}", resolution.as_str(), symbol);
        self.client.send_public(Method::Get, TRADING_VIEW_HISTORY, params).await
    }
}
