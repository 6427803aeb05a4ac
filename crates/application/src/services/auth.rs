//! Phone sign-in with one-time passwords

use baza_domain::{ApiRequest, AuthResponse, OtpChallenge, OtpVerification};
use serde::Serialize;

use crate::auth::AuthCoordinator;
use crate::error::ApiResult;
use crate::ports::{OtpProvider, Transport};

const OTP_REQUEST: &str = "/auth/otp-request";
const OTP_VERIFY: &str = "/auth/otp-verify";

#[derive(Serialize)]
struct PhoneBody<'a> {
    phone: &'a str,
}

/// Sign-in endpoints. A verified code replaces the stored token.
pub struct AuthService<T: Transport> {
    api: AuthCoordinator<T>,
}

impl<T: Transport> Clone for AuthService<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

impl<T: Transport + 'static> AuthService<T> {
    /// Creates the service.
    pub const fn new(api: AuthCoordinator<T>) -> Self {
        Self { api }
    }
}

impl<T: Transport + 'static> OtpProvider for AuthService<T> {
    async fn request(&self, phone: &str) -> ApiResult<OtpChallenge> {
        let request = ApiRequest::post(OTP_REQUEST)
            .unauthenticated()
            .with_json(&PhoneBody { phone })?;
        self.api.execute_json(request).await
    }

    async fn verify(&self, verification: &OtpVerification) -> ApiResult<AuthResponse> {
        let request = ApiRequest::post(OTP_VERIFY)
            .unauthenticated()
            .with_json(verification)?;
        let response: AuthResponse = self.api.execute_json(request).await?;

        self.api
            .credentials()
            .set_token(response.access_token.clone());
        tracing::info!(user_id = %response.user.id, "signed in");
        Ok(response)
    }
}
