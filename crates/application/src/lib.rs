//! Baza Application - Network-access core
//!
//! This crate defines the application layer with:
//! - Port traits (transport, credential store, clock, payment, OTP)
//! - The auth coordinator with single-flight token renewal
//! - A TTL cache with in-flight deduplication
//! - Periodic polling and the resource services built on all of the above

pub mod auth;
pub mod cache;
pub mod error;
pub mod polling;
pub mod ports;
pub mod services;
pub mod session;

#[cfg(test)]
mod test_support;

pub use auth::{AuthCoordinator, TokenStore};
pub use cache::{CacheLayer, ReadOptions};
pub use error::{ApiError, ApiResult, AuthError, TransportError};
pub use polling::PollingController;
pub use ports::{
    Clock, CredentialStore, OtpProvider, PaymentProvider, TOPUP_CALLBACK_URL, TopupRequest,
    Transport,
};
pub use services::{
    AuthService, CatalogService, OrderService, PrefetchReport, ReferralService, SupportService,
    UserService, WalletService,
};
pub use session::Session;
