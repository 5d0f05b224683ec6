//! Error types for broker collaborators.
//!
//! Distinguishes "not found" from transient transport failures and from
//! malformed payloads, so callers can branch on the kind instead of on
//! message text.

use thiserror::Error;

/// Errors returned by quote, order, and position collaborators.
#[derive(Debug, Clone, Error)]
pub enum BrokerError {
    /// The broker has no data for the instrument.
    #[error("instrument not found: {symbol}")]
    NotFound {
        /// Trading symbol that was requested.
        symbol: String,
    },

    /// Connection-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// The call exceeded its time bound.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// Rate limit exceeded.
    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimit {
        /// Seconds to wait before retry.
        retry_after_secs: u64,
    },

    /// Non-success HTTP response.
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code.
        status_code: u16,
        /// Error message from the broker.
        message: String,
    },

    /// Order refused by the broker.
    #[error("order rejected: {0}")]
    OrderRejected(String),

    /// Payload did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Missing or invalid session.
    #[error("authentication error: {0}")]
    Authentication(String),

    /// Client could not be configured.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl BrokerError {
    /// Creates a not-found error.
    pub fn not_found(symbol: impl Into<String>) -> Self {
        Self::NotFound {
            symbol: symbol.into(),
        }
    }

    /// Creates an API error from status code and message.
    pub fn api(status_code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status_code,
            message: message.into(),
        }
    }

    /// Creates a rate limit error.
    pub fn rate_limit(retry_after_secs: u64) -> Self {
        Self::RateLimit { retry_after_secs }
    }

    /// Returns true when the instrument simply does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if the error indicates the request could succeed later.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) | Self::RateLimit { .. } => true,
            Self::Api { status_code, .. } => *status_code >= 500,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for BrokerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Result type alias for broker operations.
pub type BrokerResult<T> = std::result::Result<T, BrokerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_its_own_kind() {
        let err = BrokerError::not_found("NIFTY25SEP2520000PE");
        assert!(err.is_not_found());
        assert!(!err.is_transient());
        assert!(err.to_string().contains("NIFTY25SEP2520000PE"));
    }

    #[test]
    fn transport_errors_are_transient() {
        assert!(BrokerError::Network("connection refused".to_string()).is_transient());
        assert!(BrokerError::Timeout("10s elapsed".to_string()).is_transient());
        assert!(BrokerError::rate_limit(1).is_transient());
    }

    #[test]
    fn server_errors_are_transient_client_errors_are_not() {
        assert!(BrokerError::api(503, "unavailable").is_transient());
        assert!(!BrokerError::api(400, "bad request").is_transient());
    }

    #[test]
    fn malformed_payload_is_not_transient() {
        let err: BrokerError = serde_json::from_str::<u32>("\"x\"").unwrap_err().into();
        assert!(matches!(err, BrokerError::Malformed(_)));
        assert!(!err.is_transient());
    }

    #[test]
    fn display_includes_status_and_message() {
        let err = BrokerError::api(403, "TokenException");
        let display = err.to_string();
        assert!(display.contains("403"));
        assert!(display.contains("TokenException"));
    }
}
