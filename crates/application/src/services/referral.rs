//! Referral programme

use baza_domain::{ApiRequest, ReferralStats};

use crate::auth::AuthCoordinator;
use crate::error::ApiResult;
use crate::ports::Transport;

const STATS: &str = "/referral/stats";

/// Referral endpoint.
pub struct ReferralService<T: Transport> {
    api: AuthCoordinator<T>,
}

impl<T: Transport> Clone for ReferralService<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

impl<T: Transport + 'static> ReferralService<T> {
    /// Creates the service.
    pub const fn new(api: AuthCoordinator<T>) -> Self {
        Self { api }
    }

    /// The caller's code, referrals and credits.
    ///
    /// # Errors
    ///
    /// Returns an error if the stats cannot be fetched or decoded.
    pub async fn stats(&self) -> ApiResult<ReferralStats> {
        self.api.execute_json(ApiRequest::get(STATS)).await
    }
}
