//! Card top-up port

use std::future::Future;

use baza_domain::{TopupInitiation, TopupVerification};
use serde::Serialize;

use crate::error::ApiResult;

/// Deep link the checkout page returns to after payment.
pub const TOPUP_CALLBACK_URL: &str = "bazang://wallet/topup-success";

/// Parameters for starting a wallet top-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopupRequest {
    /// Amount to credit, in naira.
    pub amount: u64,
    /// Where the checkout page redirects once done.
    pub callback_url: String,
}

impl TopupRequest {
    /// Top-up returning to the app's default callback.
    #[must_use]
    pub fn new(amount: u64) -> Self {
        Self {
            amount,
            callback_url: TOPUP_CALLBACK_URL.to_string(),
        }
    }
}

/// Port for a redirect-based payment flow.
///
/// `initiate` yields a checkout URL and a reference; the caller sends the
/// user to the URL and later calls `verify` with the reference.
pub trait PaymentProvider: Send + Sync {
    /// Starts a payment.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses or cannot be reached.
    fn initiate(
        &self,
        request: &TopupRequest,
    ) -> impl Future<Output = ApiResult<TopupInitiation>> + Send;

    /// Checks the outcome of a payment by reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses or cannot be reached.
    fn verify(&self, reference: &str)
    -> impl Future<Output = ApiResult<TopupVerification>> + Send;
}
