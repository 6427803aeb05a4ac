//! Infrastructure error types

use baza_application::TransportError;
use thiserror::Error;

/// Errors raised while wiring the client together.
#[derive(Debug, Error)]
pub enum InfrastructureError {
    /// Settings could not be loaded or are invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The HTTP transport could not be built.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A global tracing subscriber is already installed.
    #[error("tracing init failed: {0}")]
    Telemetry(String),
}

impl From<config::ConfigError> for InfrastructureError {
    fn from(error: config::ConfigError) -> Self {
        Self::Config(error.to_string())
    }
}

impl From<baza_domain::DomainError> for InfrastructureError {
    fn from(error: baza_domain::DomainError) -> Self {
        Self::Config(error.to_string())
    }
}

/// Result type alias for infrastructure operations.
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
