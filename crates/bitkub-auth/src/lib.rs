//! Credentials and request signing for the Bitkub API
//!
//! Bitkub's private (v3) endpoints authenticate each request with three
//! headers: the API key, a millisecond timestamp, and an HMAC-SHA256 hex
//! signature over `timestamp + method + path + body`.
//!
//! # Example
//!
//! ```no_run
//! use bitkub_auth::{Credentials, Payload, RequestSigner, SignedRequest};
//! use bitkub_types::Method;
//! use serde_json::json;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = Credentials::from_env()?;
//!
//!     let mut body = Payload::new();
//!     body.insert("sym".into(), json!("BTC_THB"));
//!     body.insert("amt".into(), json!(1000));
//!     body.insert("rat".into(), json!(2_000_000));
//!
//!     let request = SignedRequest::new(1_700_000_000_000, Method::Post, "/api/v3/market/place-bid", body);
//!     let headers = RequestSigner::new(&creds).headers(&request)?;
//!     println!("{} signed headers", headers.len());
//!     Ok(())
//! }
//! ```

mod credentials;
mod error;
mod signer;

pub use credentials::{Credentials, API_KEY_ENV, API_SECRET_ENV};
pub use error::{AuthError, AuthResult};
pub use signer::{
    build_signature, canonical_json, canonical_query, sign_payload, Payload, RequestSigner,
    SignedRequest, HEADER_API_KEY, HEADER_SIGNATURE, HEADER_TIMESTAMP,
};
