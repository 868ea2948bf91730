//! Error types for the SMS email bridge.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur while resolving an alias and relaying a message.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The supplied phone number could not be normalized
    #[error("Invalid phone number: {0}")]
    InvalidPhoneNumber(String),

    /// An alias local part does not decode back to a phone number
    #[error("Invalid alias local part: {0}")]
    InvalidAlias(String),

    /// A to/cc/bcc entry is not a syntactically valid email address
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Aliasing provider unreachable or returned a 5xx (retryable)
    #[error("Aliasing provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Aliasing provider rejected the request (non-retryable 4xx)
    #[error("Aliasing provider rejected request (status {status}): {message}")]
    ProviderRejected { status: u16, message: String },

    /// Provider reports the alias local part as already taken.
    ///
    /// This is a concurrency signal, not a user error: `resolve_or_create`
    /// recovers by re-running the lookup and returning the existing alias.
    #[error("Alias already exists upstream: {0}")]
    AliasCreationConflict(String),

    /// Message assembly failed after validation
    #[error("Failed to compose message: {0}")]
    ComposeFailed(String),

    /// SMTP connection or timeout failure (retryable)
    #[error("SMTP transport unavailable: {0}")]
    TransportUnavailable(String),

    /// Terminal SMTP failure (bad credentials, recipient refused)
    #[error("SMTP transport rejected message: {0}")]
    TransportRejected(String),

    /// Failed to parse a provider JSON response
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BridgeError {
    /// Whether the failure is transient and a caller-level retry may succeed.
    ///
    /// The bridge itself never retries; this is advisory for callers.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ProviderUnavailable(_) | Self::TransportUnavailable(_)
        )
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with BridgeError
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
