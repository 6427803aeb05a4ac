//! Application error types
//!
//! Errors are `Clone` because a single outcome (a renewal failure, a
//! failed shared fetch) is delivered to every caller waiting on it.

use baza_domain::{ApiErrorBody, DomainError, StatusCode};
use thiserror::Error;

/// Failure reported by a [`Transport`](crate::ports::Transport).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// No response within the transport timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that elapsed.
        timeout_ms: u64,
    },

    /// The server could not be reached.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The server answered with a non-2xx status.
    #[error("server responded with {status}")]
    Status {
        /// Response status.
        status: StatusCode,
        /// Raw response body.
        body: Vec<u8>,
    },

    /// The request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Any other transport failure.
    #[error("transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Returns true if the server rejected the bearer credential.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status, .. } if status.is_unauthorized())
    }
}

/// Authorization failures that survive the renewal path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The renewal endpoint failed; the session has been invalidated.
    #[error("token renewal failed: {0}")]
    RenewalFailed(String),

    /// The request was rejected again after being replayed with a renewed token.
    #[error("request rejected after token renewal")]
    Unauthorized,

    /// The renewal task ended without reporting an outcome.
    #[error("token renewal was interrupted")]
    RenewalInterrupted,
}

/// Error surfaced to callers of the network-access layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Timeout, connectivity or request-building failure.
    #[error(transparent)]
    Transport(TransportError),

    /// Authorization could not be recovered.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Non-success status other than a recoverable 401, passed through.
    #[error("server responded with {status}{}", body.as_ref().map(|b| format!(": {}", b.error)).unwrap_or_default())]
    Server {
        /// Response status.
        status: StatusCode,
        /// Parsed `{error, code}` body, when present.
        body: Option<ApiErrorBody>,
    },

    /// A success body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The request itself was malformed.
    #[error("invalid request: {0}")]
    Request(#[from] DomainError),

    /// A shared operation ended without delivering an outcome.
    #[error("operation interrupted: {0}")]
    Interrupted(String),
}

impl ApiError {
    /// Returns true for authorization failures, including a pass-through 401.
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        match self {
            Self::Auth(_) => true,
            Self::Server { status, .. } => status.is_unauthorized(),
            _ => false,
        }
    }

    /// The server's error message, when it sent one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Server {
                body: Some(body), ..
            } => Some(body.error.as_str()),
            _ => None,
        }
    }

    /// The server's error code, when it sent one.
    #[must_use]
    pub fn server_code(&self) -> Option<&str> {
        match self {
            Self::Server {
                body: Some(body), ..
            } => Some(body.code.as_str()),
            _ => None,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Status { status, body } => Self::Server {
                status,
                body: ApiErrorBody::parse(&body),
            },
            other => Self::Transport(other),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error.to_string())
    }
}

/// Result type alias for network-access operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_becomes_server_error_with_body() {
        let error = ApiError::from(TransportError::Status {
            status: StatusCode::new(402),
            body: br#"{"error":"Insufficient funds","code":"INSUFFICIENT_FUNDS"}"#.to_vec(),
        });
        assert_eq!(error.server_message(), Some("Insufficient funds"));
        assert_eq!(error.server_code(), Some("INSUFFICIENT_FUNDS"));
        assert_eq!(
            error.to_string(),
            "server responded with 402 Payment Required: Insufficient funds"
        );
    }

    #[test]
    fn test_status_without_error_shape() {
        let error = ApiError::from(TransportError::Status {
            status: StatusCode::new(502),
            body: b"bad gateway".to_vec(),
        });
        assert_eq!(
            error,
            ApiError::Server {
                status: StatusCode::new(502),
                body: None
            }
        );
        assert_eq!(error.to_string(), "server responded with 502 Bad Gateway");
    }

    #[test]
    fn test_timeout_stays_transport() {
        let error = ApiError::from(TransportError::Timeout { timeout_ms: 30_000 });
        assert!(matches!(error, ApiError::Transport(_)));
        assert!(!error.is_auth());
    }

    #[test]
    fn test_is_auth() {
        assert!(ApiError::from(AuthError::Unauthorized).is_auth());
        assert!(
            ApiError::Server {
                status: StatusCode::UNAUTHORIZED,
                body: None
            }
            .is_auth()
        );
        assert!(TransportError::Status {
            status: StatusCode::UNAUTHORIZED,
            body: Vec::new()
        }
        .is_unauthorized());
    }
}
