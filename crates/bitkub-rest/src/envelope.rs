//! Response envelope handling
//!
//! Bitkub wraps most responses as `{"error": <code>, "result": <value>}`
//! where code `0` means success. A few public endpoints (`/api/status`,
//! `/api/v3/market/ticker`, `/tradingview/history`, `/api/v3/servertime`)
//! answer with a bare value instead; those bodies are passed through as-is.
//! History endpoints add a top-level `pagination` object next to `result`.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::{RestError, RestResult};
use crate::transport::HttpResponse;

/// Standard Bitkub API response wrapper
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T = Value> {
    /// Error code (0 if successful)
    pub error: i64,
    /// Result data (absent on error and on some successful calls)
    #[serde(default)]
    pub result: Option<T>,
    /// Page cursor sent by history endpoints
    #[serde(default)]
    pub pagination: Option<PageInfo>,
}

/// Page cursor from a paginated response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub last: Option<u32>,
    #[serde(default)]
    pub next: Option<u32>,
    #[serde(default)]
    pub prev: Option<u32>,
}

impl PageInfo {
    /// Whether a later page exists
    pub fn has_more(&self) -> bool {
        match (self.page, self.last) {
            (Some(page), Some(last)) => page < last,
            _ => self.next.is_some_and(|next| Some(next) != self.page),
        }
    }
}

/// A result together with the page cursor that came with it
#[derive(Debug, Clone, PartialEq)]
pub struct Paged<T = Value> {
    pub items: T,
    /// `None` when the response carried no `pagination` object
    pub pagination: Option<PageInfo>,
}

impl<T> Paged<T> {
    /// Whether a later page exists
    pub fn has_more(&self) -> bool {
        self.pagination.as_ref().is_some_and(PageInfo::has_more)
    }
}

impl<T> ApiResponse<T> {
    /// Check if the response indicates success
    pub fn is_success(&self) -> bool {
        self.error == 0
    }

    /// Get the result, returning an API error for a non-zero code
    ///
    /// The result is never inspected when the code is non-zero.
    pub fn into_result(self) -> RestResult<Option<T>> {
        if self.is_success() {
            Ok(self.result)
        } else {
            Err(RestError::from_code(self.error))
        }
    }
}

/// Turn a raw HTTP response into the result value or a typed error
///
/// - envelope with code 0: the `result` value, or `null` if absent
/// - envelope with a non-zero code: [`RestError::Api`]
/// - non-envelope JSON on a 2xx status: the body unchanged
/// - anything unreadable: [`RestError::Http`] for non-2xx, otherwise
///   [`RestError::Parse`]
pub fn normalize(response: &HttpResponse) -> RestResult<Value> {
    normalize_paged(response).map(|paged| paged.items)
}

/// Same as [`normalize`], keeping the envelope's `pagination` object
pub fn normalize_paged(response: &HttpResponse) -> RestResult<Paged> {
    let value: Value = match serde_json::from_str(&response.body) {
        Ok(value) => value,
        Err(e) => return Err(unreadable(response, format!("invalid JSON: {}", e))),
    };

    if !is_envelope(&value) {
        return if response.is_success() {
            Ok(Paged {
                items: value,
                pagination: None,
            })
        } else {
            Err(unreadable(response, "unexpected body".to_string()))
        };
    }

    let mut envelope: ApiResponse<Value> = serde_json::from_value(value)
        .map_err(|e| unreadable(response, format!("malformed envelope: {}", e)))?;

    if !envelope.is_success() {
        warn!(
            code = envelope.error,
            status = response.status,
            "Bitkub API returned an error"
        );
    }

    let pagination = envelope.pagination.take();
    Ok(Paged {
        items: envelope.into_result()?.unwrap_or(Value::Null),
        pagination,
    })
}

/// Read the server time from either the bare or the enveloped form
pub fn parse_server_time(value: &Value) -> RestResult<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or_else(|| RestError::Parse(format!("server time out of range: {}", n))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| RestError::Parse(format!("server time is not numeric: {}", s))),
        other => Err(RestError::Parse(format!(
            "unexpected server time value: {}",
            other
        ))),
    }
}

/// Deserialize a normalized result into a typed value
pub fn decode<T: serde::de::DeserializeOwned>(value: Value) -> RestResult<T> {
    serde_json::from_value(value).map_err(|e| RestError::Parse(e.to_string()))
}

fn is_envelope(value: &Value) -> bool {
    value.as_object().is_some_and(|map| map.contains_key("error"))
}

fn unreadable(response: &HttpResponse, reason: String) -> RestError {
    if response.is_success() {
        RestError::Parse(reason)
    } else {
        RestError::Http {
            status: response.status,
            body: response.body.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_returns_result_unchanged() {
        let response = HttpResponse::new(200, r#"{"error":0,"result":{"THB":1.5,"BTC":[1,2]}}"#);
        assert_eq!(normalize(&response).unwrap(), json!({"THB": 1.5, "BTC": [1, 2]}));
    }

    #[test]
    fn test_success_without_result_is_null() {
        let response = HttpResponse::new(200, r#"{"error":0}"#);
        assert_eq!(normalize(&response).unwrap(), Value::Null);
    }

    #[test]
    fn test_error_code_maps_to_api_error() {
        let response = HttpResponse::new(200, r#"{"error":5,"result":null}"#);
        let err = normalize(&response).unwrap_err();
        assert_eq!(err.api_code(), Some(5));
    }

    #[test]
    fn test_error_code_on_http_error_status() {
        let response = HttpResponse::new(401, r#"{"error":6}"#);
        assert_eq!(normalize(&response).unwrap_err().api_code(), Some(6));
    }

    #[test]
    fn test_bare_body_passes_through() {
        let response = HttpResponse::new(200, r#"[{"name":"Secure endpoints","status":"ok","message":""}]"#);
        let value = normalize(&response).unwrap();
        assert_eq!(value[0]["status"], "ok");
    }

    #[test]
    fn test_invalid_json() {
        let ok = HttpResponse::new(200, "Invalid JSON");
        assert!(matches!(normalize(&ok), Err(RestError::Parse(_))));

        let bad = HttpResponse::new(502, "<html>Bad gateway</html>");
        assert!(matches!(
            normalize(&bad),
            Err(RestError::Http { status: 502, .. })
        ));
    }

    #[test]
    fn test_non_numeric_error_field() {
        let response = HttpResponse::new(400, r#"{"error":"Invalid API key"}"#);
        assert!(matches!(
            normalize(&response),
            Err(RestError::Http { status: 400, .. })
        ));
    }

    #[test]
    fn test_pagination_is_kept() {
        let response = HttpResponse::new(
            200,
            r#"{"error":0,"result":[{"id":"1"}],"pagination":{"page":2,"last":3,"next":3,"prev":1}}"#,
        );
        let paged = normalize_paged(&response).unwrap();
        assert_eq!(paged.items, json!([{"id": "1"}]));
        let info = paged.pagination.clone().unwrap();
        assert_eq!(info.page, Some(2));
        assert_eq!(info.last, Some(3));
        assert!(paged.has_more());

        let last_page = HttpResponse::new(200, r#"{"error":0,"result":[],"pagination":{"page":2,"last":2}}"#);
        assert!(!normalize_paged(&last_page).unwrap().has_more());
    }

    #[test]
    fn test_no_pagination_object() {
        let response = HttpResponse::new(200, r#"{"error":0,"result":[]}"#);
        let paged = normalize_paged(&response).unwrap();
        assert_eq!(paged.pagination, None);
        assert!(!paged.has_more());
    }

    #[test]
    fn test_parse_server_time() {
        assert_eq!(parse_server_time(&json!(1700000000000i64)).unwrap(), 1_700_000_000_000);
        assert_eq!(parse_server_time(&json!("1700000000000")).unwrap(), 1_700_000_000_000);
        assert!(parse_server_time(&json!({"ts": 1})).is_err());
    }

    #[test]
    fn test_into_result_skips_result_on_error() {
        let envelope: ApiResponse<Value> =
            serde_json::from_str(r#"{"error":18,"result":{"ignored":true}}"#).unwrap();
        assert!(!envelope.is_success());
        assert_eq!(envelope.into_result().unwrap_err().api_code(), Some(18));
    }
}
