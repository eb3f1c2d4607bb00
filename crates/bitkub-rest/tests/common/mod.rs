//! Common test utilities and fixtures for integration tests
//!
//! Response bodies are shaped after captured Bitkub API v3 responses.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bitkub_rest::{
    BitkubRestClient, ClientConfig, Credentials, HttpRequest, HttpResponse, HttpTransport,
    TransportError,
};
use parking_lot::Mutex;

/// Base URL the mock answers on
pub const MOCK_BASE_URL: &str = "https://mock.bitkub.test";

/// Server time used by every signed request in these tests
pub const SERVER_TIME: i64 = 1_700_000_000_000;

/// Bare server time body, as returned by `/api/v3/servertime`
pub const SERVER_TIME_BODY: &str = "1700000000000";

/// Sample `/api/status` body (not wrapped in an envelope)
pub const STATUS_BODY: &str = r#"[
    {"name": "Non-secure endpoints", "status": "ok", "message": ""},
    {"name": "Secure endpoints", "status": "ok", "message": ""}
]"#;

/// Sample `/api/v3/market/ticker` body for one symbol
pub const TICKER_BODY: &str = r#"[{
    "symbol": "BTC_THB",
    "last": "2418999.8",
    "lowest_ask": "2419000",
    "highest_bid": "2418000",
    "percent_change": "1.02",
    "base_volume": "215.23",
    "quote_volume": "518727096.21",
    "high_24_hr": "2459000",
    "low_24_hr": "2370000.01"
}]"#;

/// Sample `/api/v3/market/depth` body
pub const DEPTH_BODY: &str = r#"{
    "error": 0,
    "result": {
        "asks": [[2419000.0, 0.05], [2419500.0, 0.3]],
        "bids": [[2418000.0, 0.12], [2417500.0, 1.0]]
    }
}"#;

/// Sample `/api/v3/market/balances` body
pub const BALANCES_BODY: &str = r#"{
    "error": 0,
    "result": {
        "THB": {"available": 188379.27, "reserved": 0},
        "BTC": {"available": 8.90397323, "reserved": 0.5}
    }
}"#;

/// Sample `/api/v3/market/place-bid` body
pub const PLACE_BID_BODY: &str = r#"{
    "error": 0,
    "result": {
        "id": "1",
        "typ": "limit",
        "amt": 1000,
        "rat": 15000,
        "fee": 2.5,
        "cre": 2.5,
        "rec": 0.06666666,
        "ts": "1707220636",
        "ci": "input_client_id"
    }
}"#;

/// Envelope rejecting the call with "IP not allowed"
pub const IP_NOT_ALLOWED_BODY: &str = r#"{"error": 5, "result": null}"#;

/// Canned reply for one path
#[derive(Debug, Clone)]
pub enum Reply {
    /// Answer with this status and body
    Respond(u16, String),
    /// Fail before any response is produced
    Refuse,
}

/// Mock transport for testing
///
/// Replies are keyed by path (query string ignored) and reused for every
/// matching request. Unknown paths get a 404.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<HashMap<String, Reply>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    /// Create a mock that answers `/api/v3/servertime` with [`SERVER_TIME`]
    pub fn new() -> Arc<Self> {
        let mock = Self::default();
        mock.respond("/api/v3/servertime", 200, SERVER_TIME_BODY);
        Arc::new(mock)
    }

    /// Set the reply for a path
    pub fn respond(&self, path: &str, status: u16, body: impl Into<String>) {
        self.replies
            .lock()
            .insert(path.to_string(), Reply::Respond(status, body.into()));
    }

    /// Make requests to a path fail with a connection error
    pub fn refuse(&self, path: &str) {
        self.replies.lock().insert(path.to_string(), Reply::Refuse);
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// Paths requested so far, in order
    pub fn paths(&self) -> Vec<String> {
        self.requests().iter().map(|r| path_of(&r.url)).collect()
    }

    /// Last request sent to a path
    pub fn last_request_to(&self, path: &str) -> Option<HttpRequest> {
        self.requests()
            .into_iter()
            .rev()
            .find(|r| path_of(&r.url) == path)
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let path = path_of(&request.url);
        self.requests.lock().push(request);

        match self.replies.lock().get(&path).cloned() {
            Some(Reply::Respond(status, body)) => Ok(HttpResponse::new(status, body)),
            Some(Reply::Refuse) => Err(TransportError::ConnectionFailed(
                "mock connection refused".into(),
            )),
            None => Ok(HttpResponse::new(404, "Not Found")),
        }
    }
}

/// Strip the mock host and any query string from a URL
pub fn path_of(url: &str) -> String {
    let path = url.strip_prefix(MOCK_BASE_URL).unwrap_or(url);
    path.split('?').next().unwrap_or(path).to_string()
}

/// Public client on top of the mock
pub fn public_client(mock: &Arc<MockTransport>) -> BitkubRestClient {
    let config = ClientConfig::new().with_base_url(MOCK_BASE_URL).unwrap();
    BitkubRestClient::with_transport(config, mock.clone())
}

/// Authenticated client on top of the mock, with secret `abc`
pub fn private_client(mock: &Arc<MockTransport>) -> BitkubRestClient {
    let config = ClientConfig::new()
        .with_base_url(MOCK_BASE_URL)
        .unwrap()
        .with_credentials(Credentials::new("test-api-key", "abc").unwrap());
    BitkubRestClient::with_transport(config, mock.clone())
}
