//! Tracing subscriber setup

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{InfrastructureError, InfrastructureResult};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

/// Installs a formatted subscriber filtered by `RUST_LOG`.
///
/// # Errors
///
/// Returns `InfrastructureError::Telemetry` if a global subscriber is
/// already installed.
pub fn init_tracing() -> InfrastructureResult<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| InfrastructureError::Telemetry(e.to_string()))
}
