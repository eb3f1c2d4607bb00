//! HMAC-SHA256 request signing for Bitkub's v3 endpoints
//!
//! The signature covers the canonical payload
//! `timestamp + METHOD + path + body_repr` where `body_repr` is:
//!
//! - POST: the body as compact JSON with keys in lexicographic order
//! - GET: `?` followed by the url-encoded query with keys in lexicographic
//!   order, or nothing when there are no parameters
//!
//! The exchange recomputes the same digest from the bytes it receives, so the
//! body sent on the wire must be exactly the string that was signed.

use std::collections::BTreeMap;

use bitkub_types::Method;
use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;
use tracing::trace;

use crate::credentials::Credentials;
use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the API key
pub const HEADER_API_KEY: &str = "X-BTK-APIKEY";
/// Header carrying the hex signature
pub const HEADER_SIGNATURE: &str = "X-BTK-SIGN";
/// Header carrying the millisecond timestamp
pub const HEADER_TIMESTAMP: &str = "X-BTK-TIMESTAMP";

/// Request parameters, ordered by key
///
/// A `BTreeMap` gives the stable key order the signature depends on.
pub type Payload = BTreeMap<String, Value>;

/// A private request, fully described, ready to be signed
#[derive(Debug, Clone, PartialEq)]
pub struct SignedRequest {
    /// Server time in milliseconds since the epoch
    pub timestamp: i64,
    /// HTTP method
    pub method: Method,
    /// Endpoint path, e.g. `/api/v3/market/place-bid`
    pub path: String,
    /// Parameters (JSON body for POST, query string for GET)
    pub body: Payload,
}

impl SignedRequest {
    /// Create a new request description
    pub fn new(timestamp: i64, method: Method, path: impl Into<String>, body: Payload) -> Self {
        Self {
            timestamp,
            method,
            path: path.into(),
            body,
        }
    }

    /// Body string sent on the wire for POST requests
    pub fn body_json(&self) -> AuthResult<String> {
        canonical_json(&self.body)
    }

    /// Query string (without `?`) sent on the wire for GET requests
    pub fn query_string(&self) -> AuthResult<String> {
        canonical_query(&self.body)
    }

    /// Path plus query string, as requested on the wire
    pub fn path_and_query(&self) -> AuthResult<String> {
        let query = self.query_string()?;
        if self.method.has_body() || query.is_empty() {
            Ok(self.path.clone())
        } else {
            Ok(format!("{}?{}", self.path, query))
        }
    }

    /// The exact string covered by the signature
    pub fn canonical_payload(&self) -> AuthResult<String> {
        let tail = if self.method.has_body() {
            format!("{}{}", self.path, self.body_json()?)
        } else {
            self.path_and_query()?
        };
        Ok(format!("{}{}{}", self.timestamp, self.method.as_str(), tail))
    }
}

/// Serialize a payload as compact JSON with sorted keys
pub fn canonical_json(body: &Payload) -> AuthResult<String> {
    serde_json::to_string(body).map_err(|e| AuthError::Serialization(e.to_string()))
}

/// Serialize a payload as a url-encoded query string with sorted keys
///
/// `null` values are omitted. Strings are used verbatim; other values use
/// their JSON text.
pub fn canonical_query(params: &Payload) -> AuthResult<String> {
    let pairs: Vec<(&str, String)> = params
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| {
            let rendered = match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k.as_str(), rendered)
        })
        .collect();

    serde_urlencoded::to_string(&pairs).map_err(|e| AuthError::Serialization(e.to_string()))
}

/// HMAC-SHA256 a payload and return the lowercase hex digest
pub fn sign_payload(secret: &[u8], payload: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Compute the request signature from its parts
///
/// Pure and deterministic: identical inputs always give the same digest.
pub fn build_signature(
    secret: &str,
    timestamp: i64,
    method: Method,
    path: &str,
    body: &Payload,
) -> AuthResult<String> {
    let request = SignedRequest::new(timestamp, method, path, body.clone());
    Ok(sign_payload(secret.as_bytes(), &request.canonical_payload()?))
}

/// Request signer for building authenticated requests
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer
    pub fn new(credentials: &'a Credentials) -> Self {
        Self { credentials }
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Sign the request and return the hex signature
    pub fn sign(&self, request: &SignedRequest) -> AuthResult<String> {
        let payload = request.canonical_payload()?;
        trace!(method = %request.method, path = %request.path, "Signing request");
        Ok(sign_payload(self.credentials.secret_bytes(), &payload))
    }

    /// Authentication headers for the request
    pub fn headers(&self, request: &SignedRequest) -> AuthResult<Vec<(&'static str, String)>> {
        let signature = self.sign(request)?;
        Ok(vec![
            (HEADER_API_KEY, self.api_key().to_string()),
            (HEADER_SIGNATURE, signature),
            (HEADER_TIMESTAMP, request.timestamp.to_string()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TS: i64 = 1_700_000_000_000;
    const PLACE_BID: &str = "/api/v3/market/place-bid";

    fn place_bid_body() -> Payload {
        let mut body = Payload::new();
        body.insert("sym".into(), json!("BTC_THB"));
        body.insert("amt".into(), json!(1));
        body.insert("rat".into(), json!(2));
        body
    }

    #[test]
    fn test_golden_signature() {
        let signature = build_signature("abc", TS, Method::Post, PLACE_BID, &place_bid_body()).unwrap();
        assert_eq!(
            signature,
            "df2e5e6eb1481e09a10a8dcc6b13641bee2fbbb2ccdc0fbf47f57396eedcfa92"
        );
    }

    #[test]
    fn test_golden_get_signature() {
        let mut params = Payload::new();
        params.insert("sym".into(), json!("BTC_THB"));

        let signature =
            build_signature("abc", TS, Method::Get, "/api/v3/market/my-open-orders", &params).unwrap();
        assert_eq!(
            signature,
            "b621ab76167fe153fb58abbb0b8608095a89ea1299b560e257fc8d40123ca693"
        );
    }

    #[test]
    fn test_signing_consistency() {
        let first = build_signature("abc", TS, Method::Post, PLACE_BID, &place_bid_body()).unwrap();
        let second = build_signature("abc", TS, Method::Post, PLACE_BID, &place_bid_body()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_any_field_change_changes_signature() {
        let base = build_signature("abc", TS, Method::Post, PLACE_BID, &place_bid_body()).unwrap();

        let mut other_body = place_bid_body();
        other_body.insert("amt".into(), json!(2));

        let variants = [
            build_signature("abd", TS, Method::Post, PLACE_BID, &place_bid_body()).unwrap(),
            build_signature("abc", TS + 1, Method::Post, PLACE_BID, &place_bid_body()).unwrap(),
            build_signature("abc", TS, Method::Get, PLACE_BID, &place_bid_body()).unwrap(),
            build_signature("abc", TS, Method::Post, "/api/v3/market/place-ask", &place_bid_body())
                .unwrap(),
            build_signature("abc", TS, Method::Post, PLACE_BID, &other_body).unwrap(),
        ];

        for variant in &variants {
            assert_ne!(&base, variant);
        }
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let mut reversed = Payload::new();
        reversed.insert("rat".into(), json!(2));
        reversed.insert("amt".into(), json!(1));
        reversed.insert("sym".into(), json!("BTC_THB"));

        assert_eq!(
            canonical_json(&reversed).unwrap(),
            r#"{"amt":1,"rat":2,"sym":"BTC_THB"}"#
        );
        assert_eq!(canonical_json(&reversed).unwrap(), canonical_json(&place_bid_body()).unwrap());
    }

    #[test]
    fn test_canonical_payload_shapes() {
        let post = SignedRequest::new(TS, Method::Post, PLACE_BID, place_bid_body());
        assert_eq!(
            post.canonical_payload().unwrap(),
            r#"1700000000000POST/api/v3/market/place-bid{"amt":1,"rat":2,"sym":"BTC_THB"}"#
        );

        let empty_post = SignedRequest::new(TS, Method::Post, "/api/v3/market/wallet", Payload::new());
        assert_eq!(
            empty_post.canonical_payload().unwrap(),
            "1700000000000POST/api/v3/market/wallet{}"
        );

        let empty_get = SignedRequest::new(TS, Method::Get, "/api/v3/servertime", Payload::new());
        assert_eq!(empty_get.canonical_payload().unwrap(), "1700000000000GET/api/v3/servertime");
    }

    #[test]
    fn test_query_encoding() {
        let mut params = Payload::new();
        params.insert("sym".into(), json!("BTC_THB"));
        params.insert("lmt".into(), json!(10));
        params.insert("start".into(), Value::Null);
        params.insert("note".into(), json!("a b&c"));

        assert_eq!(
            canonical_query(&params).unwrap(),
            "lmt=10&note=a+b%26c&sym=BTC_THB"
        );
    }

    #[test]
    fn test_signer_headers() {
        let creds = Credentials::new("my-key", "abc").unwrap();
        let request = SignedRequest::new(TS, Method::Post, PLACE_BID, place_bid_body());
        let headers = RequestSigner::new(&creds).headers(&request).unwrap();

        assert_eq!(headers[0], (HEADER_API_KEY, "my-key".to_string()));
        assert_eq!(
            headers[1],
            (
                HEADER_SIGNATURE,
                "df2e5e6eb1481e09a10a8dcc6b13641bee2fbbb2ccdc0fbf47f57396eedcfa92".to_string()
            )
        );
        assert_eq!(headers[2], (HEADER_TIMESTAMP, "1700000000000".to_string()));
    }

    #[test]
    fn test_sign_empty_message() {
        // Should not panic on empty message
        let signature = sign_payload(b"abc", "");
        assert_eq!(
            signature,
            "e2636077506729a8f61aff2441332e40e844a8ad44489efd80210ea6d1f51088"
        );
    }
}
