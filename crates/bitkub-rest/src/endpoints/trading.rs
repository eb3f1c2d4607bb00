//! Private trading endpoints
//!
//! These endpoints require authentication.

use bitkub_types::validation::validate_timestamp;
use bitkub_types::{Method, OrderSide};
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::symbol_params;
use crate::client::BitkubRestClient;
use crate::envelope::Paged;
use crate::error::RestResult;
use crate::types::{OrderRef, OrderRequest, OrderResult, Pagination};

const PLACE_BID: &str = "/api/v3/market/place-bid";
const PLACE_ASK: &str = "/api/v3/market/place-ask";
const CANCEL_ORDER: &str = "/api/v3/market/cancel-order";
const MY_OPEN_ORDERS: &str = "/api/v3/market/my-open-orders";
const MY_ORDER_HISTORY: &str = "/api/v3/market/my-order-history";
const ORDER_INFO: &str = "/api/v3/market/order-info";

/// Private trading endpoints
pub struct TradingEndpoints<'a> {
    client: &'a BitkubRestClient,
}

impl<'a> TradingEndpoints<'a> {
    pub fn new(client: &'a BitkubRestClient) -> Self {
        Self { client }
    }

    /// Place a buy order; `amount` is in the quote currency
    #[instrument(skip(self, order), fields(symbol = %order.symbol))]
    pub async fn place_bid(&self, order: &OrderRequest) -> RestResult<OrderResult> {
        self.place(PLACE_BID, order).await
    }

    /// Place a sell order; `amount` is in the base currency
    #[instrument(skip(self, order), fields(symbol = %order.symbol))]
    pub async fn place_ask(&self, order: &OrderRequest) -> RestResult<OrderResult> {
        self.place(PLACE_ASK, order).await
    }

    /// Place an order on the side named by the request
    pub async fn place_order(&self, order: &OrderRequest) -> RestResult<OrderResult> {
        match order.side {
            OrderSide::Buy => self.place_bid(order).await,
            OrderSide::Sell => self.place_ask(order).await,
        }
    }

    async fn place(&self, path: &str, order: &OrderRequest) -> RestResult<OrderResult> {
        let params = order.to_params()?;

        info!(
            side = %order.side,
            order_type = %order.order_type,
            amount = %order.amount,
            "Placing order"
        );

        self.client.send_private_as(Method::Post, path, params).await
    }

    /// Cancel an open order
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order: &OrderRef) -> RestResult<Value> {
        let params = order.to_params()?;
        debug!("Cancelling order");
        self.client.send_private(Method::Post, CANCEL_ORDER, params).await
    }

    /// Get open orders for a symbol
    #[instrument(skip(self))]
    pub async fn get_open_orders(&self, symbol: &str) -> RestResult<Value> {
        let params = symbol_params(symbol)?;
        self.client.send_private(Method::Get, MY_OPEN_ORDERS, params).await
    }

    /// Get order history for a symbol
    ///
    /// # Arguments
    /// * `symbol` - Trading pair
    /// * `page` - Page selection
    /// * `start` / `end` - Optional range in unix seconds
    ///
    /// The returned page cursor tells whether later pages exist.
    #[instrument(skip(self))]
    pub async fn get_order_history(
        &self,
        symbol: &str,
        page: Pagination,
        start: Option<i64>,
        end: Option<i64>,
    ) -> RestResult<Paged> {
        let mut params = symbol_params(symbol)?;
        page.apply(&mut params)?;
        if let Some(start) = validate_timestamp(start)? {
            params.insert("start".into(), Value::from(start));
        }
        if let Some(end) = validate_timestamp(end)? {
            params.insert("end".into(), Value::from(end));
        }

        self.client
            .send_private_paged(Method::Get, MY_ORDER_HISTORY, params)
            .await
    }

    /// Get details of a single order
    #[instrument(skip(self))]
    pub async fn get_order_info(&self, order: &OrderRef) -> RestResult<Value> {
        let params = order.to_params()?;
        self.client.send_private(Method::Get, ORDER_INFO, params).await
    }
}
