//! Error types for authentication operations

/// Errors that can occur while loading credentials or signing requests
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Invalid API credentials
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Request body or query could not be serialized for signing
    #[error("Failed to serialize signing payload: {0}")]
    Serialization(String),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
