//! REST API client for the Bitkub cryptocurrency exchange
//!
//! This crate provides a thin client over Bitkub's REST API: it builds
//! requests, signs private calls, and turns the `{error, result}` envelope
//! into either the result value or a typed [`RestError`].
//!
//! # Features
//!
//! - **Market Data**: Status, symbols, ticker, trades, order book, depth
//! - **Account**: Wallet, balances, limits, trading credits
//! - **Trading**: Place bid/ask, cancel, open orders, history
//! - **Funding**: Crypto and fiat deposits/withdrawals
//!
//! # Authentication
//!
//! Private endpoints require API credentials. Each private call fetches the
//! server time and signs `timestamp + method + path + body` with
//! HMAC-SHA256, as specified by Bitkub's v3 API.
//!
//! # Example
//!
//! ```no_run
//! use bitkub_rest::{BitkubRestClient, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = BitkubRestClient::new()?;
//!     let tickers = client.get_ticker(Some("BTC_THB")).await?;
//!     println!("BTC/THB: {:?}", tickers);
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = BitkubRestClient::with_credentials(creds)?;
//!     let balances = auth_client.get_balances().await?;
//!     println!("Balances: {:?}", balances);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Retries
//!
//! Calls are one-shot. Rejections such as an out-of-window timestamp
//! (error code 8) are returned to the caller as-is.

pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod transport;
pub mod types;

// Re-export main types
pub use bitkub_auth::Credentials;
pub use client::{BitkubRestClient, ClientConfig};
pub use envelope::{ApiResponse, PageInfo, Paged};
pub use error::{RestError, RestResult};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};

// Re-export endpoint-specific types
pub use types::{
    // Market data
    Depth, SymbolInfo, SystemStatus, Ticker,
    // Account
    Balance,
    // Trading
    OrderRef, OrderRequest, OrderResult,
    // Funding
    Pagination, WithdrawRequest,
};
