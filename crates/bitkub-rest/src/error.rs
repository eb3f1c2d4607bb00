//! Error types for REST API operations

use bitkub_auth::AuthError;
use bitkub_types::{describe_error_code, BitkubErrorCode, ValidationError};

use crate::transport::TransportError;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Transport failed before a response was received
    #[error("Network error: {0}")]
    Network(#[from] TransportError),

    /// API returned a non-zero error code
    #[error("API error ({code}): {message}")]
    Api {
        /// Numeric code from the `error` field
        code: i64,
        /// Message from the static code table
        message: String,
    },

    /// Non-2xx status without a readable envelope
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Failed to parse response
    #[error("Parse error: {0}")]
    Parse(String),

    /// Missing API credentials for private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// Credential or signing failure
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(#[from] ValidationError),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl RestError {
    /// Create an API error from the numeric code returned by Bitkub
    pub fn from_code(code: i64) -> Self {
        Self::Api {
            code,
            message: describe_error_code(code).to_string(),
        }
    }

    /// Numeric API code, if this is an API error
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Structured API code, if the code is in the table
    pub fn error_code(&self) -> Option<BitkubErrorCode> {
        self.api_code().and_then(BitkubErrorCode::from_code)
    }

    /// Check if the request never produced a response
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Check if the exchange rejected the request timestamp
    pub fn is_timestamp_error(&self) -> bool {
        self.error_code().is_some_and(|c| c.is_timestamp_error())
    }

    /// Check if this error indicates bad or missing credentials
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::AuthRequired | Self::Auth(_))
            || self.error_code().is_some_and(|c| c.is_auth_error())
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_uses_table() {
        let err = RestError::from_code(5);
        assert_eq!(err.api_code(), Some(5));
        assert_eq!(err.error_code(), Some(BitkubErrorCode::IpNotAllowed));
        assert_eq!(err.to_string(), "API error (5): IP not allowed");
        assert!(err.is_auth_error());
    }

    #[test]
    fn test_unknown_code() {
        let err = RestError::from_code(777);
        assert_eq!(err.api_code(), Some(777));
        assert_eq!(err.error_code(), None);
        assert!(err.to_string().contains("Unknown error"));
    }

    #[test]
    fn test_classification() {
        assert!(RestError::from_code(8).is_timestamp_error());
        assert!(!RestError::from_code(8).is_network());

        let network = RestError::from(TransportError::ConnectionFailed("refused".into()));
        assert!(network.is_network());
        assert_eq!(network.api_code(), None);

        assert!(RestError::AuthRequired.is_auth_error());
    }
}
