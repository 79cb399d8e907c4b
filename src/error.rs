//! Error types for the lead widget.

use std::time::Duration;

/// Top-level error type for the widget core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Widget event receiver dropped")]
    EventsClosed,
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Failures talking to the chat/lead service.
///
/// `Rejected` is the service answering `success: false`; everything else is a
/// transport-level failure. Callers treat both the same way.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request to {endpoint} failed: {reason}")]
    Transport { endpoint: String, reason: String },

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("{endpoint} rejected the request: {reason}")]
    Rejected { endpoint: String, reason: String },

    #[error("Invalid response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    #[error("{endpoint} timed out after {timeout:?}")]
    Timeout { endpoint: String, timeout: Duration },
}

impl ApiError {
    /// Whether the service itself answered with `success: false`.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// Recoverable input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Not a valid email address: {0}")]
    InvalidEmail(String),
}

/// Result type alias for the widget core.
pub type Result<T> = std::result::Result<T, Error>;
