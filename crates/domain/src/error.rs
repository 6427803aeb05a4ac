//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A request path does not start with `/`.
    #[error("invalid request path: {0}")]
    InvalidPath(String),

    /// A request body could not be serialized.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// A settings value is out of range or malformed.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
