//! Private account endpoints
//!
//! These endpoints require authentication.

use std::collections::HashMap;

use bitkub_auth::Payload;
use bitkub_types::Method;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::client::BitkubRestClient;
use crate::error::RestResult;
use crate::types::Balance;

const USER_LIMITS: &str = "/api/v3/user/limits";
const TRADING_CREDITS: &str = "/api/v3/user/trading-credits";
const WALLET: &str = "/api/v3/market/wallet";
const BALANCES: &str = "/api/v3/market/balances";
const WSTOKEN: &str = "/api/v3/market/wstoken";

/// Private account endpoints
pub struct AccountEndpoints<'a> {
    client: &'a BitkubRestClient,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(client: &'a BitkubRestClient) -> Self {
        Self { client }
    }

    /// Get deposit/withdrawal limits and current usage
    #[instrument(skip(self))]
    pub async fn get_user_limits(&self) -> RestResult<Value> {
        debug!("Fetching user limits");
        self.client.send_private(Method::Post, USER_LIMITS, Payload::new()).await
    }

    /// Get remaining trading credits
    #[instrument(skip(self))]
    pub async fn get_trading_credits(&self) -> RestResult<Decimal> {
        self.client
            .send_private_as(Method::Post, TRADING_CREDITS, Payload::new())
            .await
    }

    /// Get available balance per currency
    #[instrument(skip(self))]
    pub async fn get_wallet(&self) -> RestResult<HashMap<String, Decimal>> {
        self.client.send_private_as(Method::Post, WALLET, Payload::new()).await
    }

    /// Get available and reserved balance per currency
    #[instrument(skip(self))]
    pub async fn get_balances(&self) -> RestResult<HashMap<String, Balance>> {
        self.client.send_private_as(Method::Post, BALANCES, Payload::new()).await
    }

    /// Get a token for the private websocket feed
    #[instrument(skip(self))]
    pub async fn get_ws_token(&self) -> RestResult<String> {
        self.client.send_private_as(Method::Post, WSTOKEN, Payload::new()).await
    }
}
