//! Baza Infrastructure - Adapters and wiring
//!
//! This crate provides concrete implementations of the ports defined in
//! the application layer, plus settings loading and logging setup.

pub mod adapters;
pub mod bootstrap;
pub mod error;
pub mod settings;
pub mod telemetry;

pub use adapters::{ReqwestTransport, SystemClock};
pub use bootstrap::connect;
pub use error::{InfrastructureError, InfrastructureResult};
pub use settings::{load_settings, load_settings_from};
pub use telemetry::init_tracing;
