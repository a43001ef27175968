//! Error types for vendor delivery operations.
//!
//! Failures are categorized for retry decisions: transient network and
//! server conditions are retryable, remote rejections and internal
//! defects are terminal.

use thiserror::Error;

/// Result type alias for delivery operations.
pub type Result<T> = std::result::Result<T, DeliveryError>;

/// Error conditions raised while delivering a transaction.
#[derive(Debug, Clone, Error)]
pub enum DeliveryError {
    /// Network-level connectivity failure (refused, reset, DNS).
    #[error("network connection failed: {message}")]
    NetworkError {
        /// Description of the network failure.
        message: String,
    },

    /// HTTP request timeout exceeded.
    #[error("request timeout after {timeout_seconds}s")]
    Timeout {
        /// Seconds before the request timed out.
        timeout_seconds: u64,
    },

    /// Vendor responded 4xx; the request itself is defective.
    #[error("vendor client error: HTTP {status_code}")]
    ClientError {
        /// HTTP status code (4xx).
        status_code: u16,
        /// Response body content.
        body: String,
    },

    /// Vendor responded 5xx; the vendor is temporarily unhealthy.
    #[error("vendor server error: HTTP {status_code}")]
    ServerError {
        /// HTTP status code (5xx).
        status_code: u16,
        /// Response body content.
        body: String,
    },

    /// All retry attempts exhausted.
    #[error("delivery failed after exhausting {max_retries} retries")]
    RetriesExhausted {
        /// Configured maximum retry count.
        max_retries: u32,
    },

    /// Invalid client configuration.
    #[error("invalid client configuration: {message}")]
    ConfigurationError {
        /// Configuration error message.
        message: String,
    },

    /// Unexpected internal failure.
    #[error("internal delivery error: {message}")]
    InternalError {
        /// Internal error message.
        message: String,
    },
}

impl DeliveryError {
    /// Creates a network error from a message.
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError { message: message.into() }
    }

    /// Creates a timeout error.
    pub fn timeout(timeout_seconds: u64) -> Self {
        Self::Timeout { timeout_seconds }
    }

    /// Creates a client error from a vendor response.
    pub fn client_error(status_code: u16, body: impl Into<String>) -> Self {
        Self::ClientError { status_code, body: body.into() }
    }

    /// Creates a server error from a vendor response.
    pub fn server_error(status_code: u16, body: impl Into<String>) -> Self {
        Self::ServerError { status_code, body: body.into() }
    }

    /// Creates a retries-exhausted error naming the configured bound.
    pub fn retries_exhausted(max_retries: u32) -> Self {
        Self::RetriesExhausted { max_retries }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError { message: message.into() }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError { message: message.into() }
    }

    /// Whether this failure is transient and worth retrying.
    ///
    /// Network failures, timeouts, and 5xx responses are retryable.
    /// 4xx responses, exhausted retries, configuration problems, and
    /// internal errors are terminal.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::ServerError { .. } => true,
            Self::ClientError { .. }
            | Self::RetriesExhausted { .. }
            | Self::ConfigurationError { .. }
            | Self::InternalError { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors_identified_correctly() {
        assert!(DeliveryError::network("connection refused").is_retryable());
        assert!(DeliveryError::timeout(30).is_retryable());
        assert!(DeliveryError::server_error(500, "internal server error").is_retryable());
        assert!(DeliveryError::server_error(503, "unavailable").is_retryable());

        assert!(!DeliveryError::client_error(400, "bad request").is_retryable());
        assert!(!DeliveryError::client_error(404, "not found").is_retryable());
        assert!(!DeliveryError::retries_exhausted(3).is_retryable());
        assert!(!DeliveryError::configuration("bad url").is_retryable());
        assert!(!DeliveryError::internal("boom").is_retryable());
    }

    #[test]
    fn error_display_format() {
        assert_eq!(DeliveryError::timeout(30).to_string(), "request timeout after 30s");
        assert_eq!(
            DeliveryError::retries_exhausted(3).to_string(),
            "delivery failed after exhausting 3 retries"
        );
        assert_eq!(
            DeliveryError::client_error(404, "missing").to_string(),
            "vendor client error: HTTP 404"
        );
    }
}
