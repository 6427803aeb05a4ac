//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the network-access core and the
//! outside world. Each port is a trait implemented by an adapter in the
//! infrastructure layer, or by a fake in tests.

mod clock;
mod credential_store;
mod otp_provider;
mod payment_provider;
mod transport;

pub use clock::Clock;
pub use credential_store::CredentialStore;
pub use otp_provider::OtpProvider;
pub use payment_provider::{PaymentProvider, TopupRequest, TOPUP_CALLBACK_URL};
pub use transport::Transport;
