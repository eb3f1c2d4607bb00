//! Funding endpoints for deposits and withdrawals
//!
//! These endpoints require authentication.

use bitkub_auth::Payload;
use bitkub_types::validation::{validate_amount, validate_currency, validate_network};
use bitkub_types::{Method, ValidationError};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{info, instrument};

use crate::client::BitkubRestClient;
use crate::envelope::Paged;
use crate::error::RestResult;
use crate::types::{decimal_to_json, Pagination, WithdrawRequest};

const CRYPTO_ADDRESSES: &str = "/api/v3/crypto/addresses";
const CRYPTO_WITHDRAW: &str = "/api/v3/crypto/withdraw";
const CRYPTO_INTERNAL_WITHDRAW: &str = "/api/v3/crypto/internal-withdraw";
const CRYPTO_DEPOSIT_HISTORY: &str = "/api/v3/crypto/deposit-history";
const CRYPTO_WITHDRAW_HISTORY: &str = "/api/v3/crypto/withdraw-history";
const CRYPTO_GENERATE_ADDRESS: &str = "/api/v3/crypto/generate-address";
const FIAT_ACCOUNTS: &str = "/api/v3/fiat/accounts";
const FIAT_WITHDRAW: &str = "/api/v3/fiat/withdraw";
const FIAT_DEPOSIT_HISTORY: &str = "/api/v3/fiat/deposit-history";
const FIAT_WITHDRAW_HISTORY: &str = "/api/v3/fiat/withdraw-history";

/// Funding endpoints for deposits and withdrawals
pub struct FundingEndpoints<'a> {
    client: &'a BitkubRestClient,
}

impl<'a> FundingEndpoints<'a> {
    pub fn new(client: &'a BitkubRestClient) -> Self {
        Self { client }
    }

    async fn paged(&self, method: Method, path: &str, page: Pagination) -> RestResult<Paged> {
        let mut params = Payload::new();
        page.apply(&mut params)?;
        self.client.send_private_paged(method, path, params).await
    }

    /// List deposit addresses
    #[instrument(skip(self))]
    pub async fn get_crypto_addresses(&self, page: Pagination) -> RestResult<Paged> {
        self.paged(Method::Get, CRYPTO_ADDRESSES, page).await
    }

    /// Withdraw crypto to an external address
    #[instrument(skip(self, request), fields(currency = %request.currency))]
    pub async fn withdraw_crypto(&self, request: &WithdrawRequest) -> RestResult<Value> {
        let params = request.to_params(true)?;
        info!(amount = %request.amount, network = %request.network, "Requesting crypto withdrawal");
        self.client.send_private(Method::Post, CRYPTO_WITHDRAW, params).await
    }

    /// Withdraw crypto to another Bitkub account
    ///
    /// The request's network is not sent.
    #[instrument(skip(self, request), fields(currency = %request.currency))]
    pub async fn withdraw_internal(&self, request: &WithdrawRequest) -> RestResult<Value> {
        let params = request.to_params(false)?;
        info!(amount = %request.amount, "Requesting internal withdrawal");
        self.client
            .send_private(Method::Post, CRYPTO_INTERNAL_WITHDRAW, params)
            .await
    }

    /// Crypto deposit history
    #[instrument(skip(self))]
    pub async fn get_crypto_deposit_history(&self, page: Pagination) -> RestResult<Paged> {
        self.paged(Method::Get, CRYPTO_DEPOSIT_HISTORY, page).await
    }

    /// Crypto withdrawal history
    #[instrument(skip(self))]
    pub async fn get_crypto_withdraw_history(&self, page: Pagination) -> RestResult<Paged> {
        self.paged(Method::Get, CRYPTO_WITHDRAW_HISTORY, page).await
    }

    /// Generate a new deposit address
    ///
    /// # Arguments
    /// * `currency` - Currency code (e.g., "BTC")
    /// * `network` - Network name (e.g., "BTC")
    #[instrument(skip(self))]
    pub async fn generate_address(&self, currency: &str, network: &str) -> RestResult<Value> {
        let mut params = Payload::new();
        params.insert("sym".into(), Value::from(validate_currency(currency)?));
        params.insert("net".into(), Value::from(validate_network(network)?));
        self.client
            .send_private(Method::Post, CRYPTO_GENERATE_ADDRESS, params)
            .await
    }

    /// List approved bank accounts
    #[instrument(skip(self))]
    pub async fn get_fiat_accounts(&self, page: Pagination) -> RestResult<Paged> {
        self.paged(Method::Post, FIAT_ACCOUNTS, page).await
    }

    /// Withdraw THB to an approved bank account
    ///
    /// # Arguments
    /// * `account_id` - Bank account id from [`Self::get_fiat_accounts`]
    /// * `amount` - Amount in THB
    #[instrument(skip(self))]
    pub async fn withdraw_fiat(&self, account_id: &str, amount: Decimal) -> RestResult<Value> {
        let account_id = account_id.trim();
        if account_id.is_empty() {
            return Err(ValidationError::MissingAccountId.into());
        }
        let amount = validate_amount(amount, Decimal::ZERO)?;

        let mut params = Payload::new();
        params.insert("id".into(), Value::from(account_id));
        params.insert("amt".into(), decimal_to_json(amount)?);

        info!(%amount, "Requesting fiat withdrawal");
        self.client.send_private(Method::Post, FIAT_WITHDRAW, params).await
    }

    /// Fiat deposit history
    #[instrument(skip(self))]
    pub async fn get_fiat_deposit_history(&self, page: Pagination) -> RestResult<Paged> {
        self.paged(Method::Post, FIAT_DEPOSIT_HISTORY, page).await
    }

    /// Fiat withdrawal history
    #[instrument(skip(self))]
    pub async fn get_fiat_withdraw_history(&self, page: Pagination) -> RestResult<Paged> {
        self.paged(Method::Post, FIAT_WITHDRAW_HISTORY, page).await
    }
}
