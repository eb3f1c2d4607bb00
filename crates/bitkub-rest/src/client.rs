//! Main REST client implementation

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use bitkub_auth::{
    canonical_json, canonical_query, Credentials, Payload, RequestSigner, SignedRequest,
};
use bitkub_types::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::endpoints::{AccountEndpoints, FundingEndpoints, MarketEndpoints, TradingEndpoints};
use crate::envelope::{decode, normalize_paged, parse_server_time, Paged};
use crate::error::{RestError, RestResult};
use crate::transport::{HttpRequest, HttpTransport, ReqwestTransport};
use crate::types::{Balance, OrderRef, OrderRequest, OrderResult, Ticker};

/// Production API host
pub const DEFAULT_BASE_URL: &str = "https://api.bitkub.com";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_USER_AGENT: &str = concat!("bitkub-rest/", env!("CARGO_PKG_VERSION"));

pub(crate) const SERVER_TIME_PATH: &str = "/api/v3/servertime";

const BASE_URL_ENV: &str = "BITKUB_BASE_URL";
const TIMEOUT_ENV: &str = "BITKUB_TIMEOUT_SECS";

/// Bitkub REST API client
///
/// Provides access to both public and private endpoints. Cloning is cheap:
/// clones share the underlying HTTP connection pool.
///
/// # Example
///
/// ```no_run
/// use bitkub_rest::{BitkubRestClient, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = BitkubRestClient::new()?;
///     let time = client.get_server_time().await?;
///
///     // With authentication for private endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = BitkubRestClient::with_credentials(creds)?;
///     let wallet = auth_client.get_wallet().await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct BitkubRestClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    credentials: Option<Credentials>,
}

impl BitkubRestClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    ///
    /// All endpoints (public and private) will be available.
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::default().with_credentials(credentials))
    }

    /// Create a client configured from `BITKUB_*` environment variables
    pub fn from_env() -> RestResult<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let transport =
            ReqwestTransport::new(Duration::from_secs(config.timeout_secs), user_agent)?;

        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client on top of a custom transport
    ///
    /// The config's timeout and user agent are not applied; the transport
    /// owns those.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        info!(
            base_url = %config.base_url,
            authenticated = config.credentials.is_some(),
            "Created Bitkub REST client"
        );

        Self {
            transport,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials: config.credentials,
        }
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Request envelope
    // ========================================================================

    /// Fetch the exchange's current time in milliseconds
    ///
    /// Accepts both the bare-integer body and the `{error, result}` form.
    #[instrument(skip(self))]
    pub async fn fetch_server_time(&self) -> RestResult<i64> {
        let value = self.send_public(Method::Get, SERVER_TIME_PATH, Payload::new()).await?;
        parse_server_time(&value)
    }

    /// Send an unsigned request and return the normalized result
    #[instrument(skip(self, params))]
    pub async fn send_public(&self, method: Method, path: &str, params: Payload) -> RestResult<Value> {
        let request = self.build_request(method, path, &params)?;
        self.dispatch(request).await
    }

    /// Send a signed request and return the normalized result
    ///
    /// Fetches a fresh server timestamp for every call. The timestamp travels
    /// only in the `X-BTK-TIMESTAMP` header and at the front of the signed
    /// string; it is not merged into the body, which carries `params` as given.
    /// The signed payload and the bytes on the wire come from the same
    /// canonical serialization.
    #[instrument(skip(self, params))]
    pub async fn send_private(&self, method: Method, path: &str, params: Payload) -> RestResult<Value> {
        let request = self.signed_request(method, path, params).await?;
        self.dispatch(request).await
    }

    /// Send a signed request and keep the response's page cursor
    ///
    /// Signed like [`Self::send_private`]; used by the history endpoints.
    #[instrument(skip(self, params))]
    pub async fn send_private_paged(
        &self,
        method: Method,
        path: &str,
        params: Payload,
    ) -> RestResult<Paged> {
        let request = self.signed_request(method, path, params).await?;
        self.dispatch_paged(request).await
    }

    /// Send an unsigned request and decode the result
    pub async fn send_public_as<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: Payload,
    ) -> RestResult<T> {
        decode(self.send_public(method, path, params).await?)
    }

    /// Send a signed request and decode the result
    pub async fn send_private_as<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: Payload,
    ) -> RestResult<T> {
        decode(self.send_private(method, path, params).await?)
    }

    fn build_request(&self, method: Method, path: &str, params: &Payload) -> RestResult<HttpRequest> {
        let mut url = format!("{}{}", self.base_url, path);
        let mut body = None;

        if method.has_body() {
            body = Some(canonical_json(params)?);
        } else {
            let query = canonical_query(params)?;
            if !query.is_empty() {
                url.push('?');
                url.push_str(&query);
            }
        }

        let mut request = HttpRequest::new(method, url)
            .with_header("Accept", "application/json")
            .with_header("Content-Type", "application/json");
        if let Some(body) = body {
            request = request.with_body(body);
        }
        Ok(request)
    }

    async fn signed_request(&self, method: Method, path: &str, params: Payload) -> RestResult<HttpRequest> {
        let credentials = self.require_credentials()?;
        let timestamp = self.fetch_server_time().await?;

        let signed = SignedRequest::new(timestamp, method, path, params);
        let mut request = self.build_request(method, path, &signed.body)?;
        for (name, value) in RequestSigner::new(credentials).headers(&signed)? {
            request = request.with_header(name, value);
        }
        Ok(request)
    }

    async fn dispatch(&self, request: HttpRequest) -> RestResult<Value> {
        self.dispatch_paged(request).await.map(|paged| paged.items)
    }

    async fn dispatch_paged(&self, request: HttpRequest) -> RestResult<Paged> {
        debug!(method = %request.method, url = %request.url, "Sending request");
        let response = self.transport.execute(request).await?;
        normalize_paged(&response)
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self)
    }

    /// Get server time in milliseconds
    pub async fn get_server_time(&self) -> RestResult<i64> {
        self.market().get_server_time().await
    }

    /// Get tickers, optionally for one symbol
    pub async fn get_ticker(&self, symbol: Option<&str>) -> RestResult<Vec<Ticker>> {
        self.market().get_ticker(symbol).await
    }

    // ========================================================================
    // Private Account Endpoints
    // ========================================================================

    /// Get account endpoints (requires credentials)
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        self.require_credentials()?;
        Ok(AccountEndpoints::new(self))
    }

    /// Get available balance per currency
    pub async fn get_wallet(&self) -> RestResult<HashMap<String, rust_decimal::Decimal>> {
        self.account()?.get_wallet().await
    }

    /// Get available and reserved balance per currency
    pub async fn get_balances(&self) -> RestResult<HashMap<String, Balance>> {
        self.account()?.get_balances().await
    }

    // ========================================================================
    // Private Trading Endpoints
    // ========================================================================

    /// Get trading endpoints (requires credentials)
    pub fn trading(&self) -> RestResult<TradingEndpoints<'_>> {
        self.require_credentials()?;
        Ok(TradingEndpoints::new(self))
    }

    /// Place an order on the side named by the request
    pub async fn place_order(&self, order: &OrderRequest) -> RestResult<OrderResult> {
        self.trading()?.place_order(order).await
    }

    /// Cancel an order
    pub async fn cancel_order(&self, order: &OrderRef) -> RestResult<Value> {
        self.trading()?.cancel_order(order).await
    }

    /// Get open orders for a symbol
    pub async fn get_open_orders(&self, symbol: &str) -> RestResult<Value> {
        self.trading()?.get_open_orders(symbol).await
    }

    // ========================================================================
    // Private Funding Endpoints
    // ========================================================================

    /// Get funding endpoints (requires credentials)
    pub fn funding(&self) -> RestResult<FundingEndpoints<'_>> {
        self.require_credentials()?;
        Ok(FundingEndpoints::new(self))
    }

    fn require_credentials(&self) -> RestResult<&Credentials> {
        self.credentials.as_ref().ok_or(RestError::AuthRequired)
    }
}

impl std::fmt::Debug for BitkubRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitkubRestClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// API host, without trailing slash
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from the environment
    ///
    /// - `BITKUB_API_KEY` / `BITKUB_API_SECRET`: credentials, if either is set
    /// - `BITKUB_BASE_URL`: API host
    /// - `BITKUB_TIMEOUT_SECS`: request timeout
    pub fn from_env() -> RestResult<Self> {
        let mut config = Self::default();

        let has_key = std::env::var_os(bitkub_auth::API_KEY_ENV).is_some();
        let has_secret = std::env::var_os(bitkub_auth::API_SECRET_ENV).is_some();
        if has_key || has_secret {
            config.credentials = Some(Credentials::from_env()?);
        }

        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config = config.with_base_url(base_url)?;
        }

        if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                RestError::InvalidConfig(format!("{} must be a number of seconds, got {:?}", TIMEOUT_ENV, raw))
            })?;
            config = config.with_timeout(secs);
        }

        Ok(config)
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the API host
    ///
    /// # Errors
    /// Returns [`RestError::InvalidConfig`] unless the URL is http(s).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> RestResult<Self> {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
            return Err(RestError::InvalidConfig(format!(
                "base URL must start with http:// or https://, got {:?}",
                base_url
            )));
        }
        self.base_url = trimmed.to_string();
        Ok(self)
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_without_credentials() {
        let client = BitkubRestClient::new().unwrap();
        assert!(!client.has_credentials());
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_timeout(60)
            .with_user_agent("test-agent")
            .with_base_url("http://localhost:8080/")
            .unwrap();

        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.user_agent, Some("test-agent".to_string()));
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let result = ClientConfig::new().with_base_url("api.bitkub.com");
        assert!(matches!(result, Err(RestError::InvalidConfig(_))));
    }

    #[test]
    fn test_auth_required_error() {
        let client = BitkubRestClient::new().unwrap();
        assert!(matches!(client.account(), Err(RestError::AuthRequired)));
        assert!(matches!(client.trading(), Err(RestError::AuthRequired)));
        assert!(matches!(client.funding(), Err(RestError::AuthRequired)));
    }

    #[test]
    fn test_debug_hides_credentials() {
        let creds = Credentials::new("key-1234567890", "super-secret").unwrap();
        let client = BitkubRestClient::with_credentials(creds).unwrap();
        let debug = format!("{:?}", client);

        assert!(debug.contains("has_credentials: true"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_build_request_shapes() {
        let client = BitkubRestClient::new().unwrap();

        let mut params = Payload::new();
        params.insert("sym".into(), Value::from("BTC_THB"));
        params.insert("lmt".into(), Value::from(5));

        let get = client
            .build_request(Method::Get, "/api/v3/market/depth", &params)
            .unwrap();
        assert_eq!(get.url, "https://api.bitkub.com/api/v3/market/depth?lmt=5&sym=BTC_THB");
        assert!(get.body.is_none());

        let post = client
            .build_request(Method::Post, "/api/v3/market/wallet", &Payload::new())
            .unwrap();
        assert_eq!(post.url, "https://api.bitkub.com/api/v3/market/wallet");
        assert_eq!(post.body.as_deref(), Some("{}"));
        assert_eq!(post.header("Content-Type"), Some("application/json"));
    }
}
