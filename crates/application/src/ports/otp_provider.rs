//! One-time-password sign-in port

use std::future::Future;

use baza_domain::{AuthResponse, OtpChallenge, OtpVerification};

use crate::error::ApiResult;

/// Port for phone-number sign-in with a one-time password.
pub trait OtpProvider: Send + Sync {
    /// Sends a code to `phone`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses or cannot be reached.
    fn request(&self, phone: &str) -> impl Future<Output = ApiResult<OtpChallenge>> + Send;

    /// Exchanges a code for a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is rejected or the backend cannot be
    /// reached.
    fn verify(
        &self,
        verification: &OtpVerification,
    ) -> impl Future<Output = ApiResult<AuthResponse>> + Send;
}
