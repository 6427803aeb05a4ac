//! Account and authentication payloads

use serde::{Deserialize, Serialize};

use crate::token::AccessToken;

/// Notification channels the user opted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct NotificationPreferences {
    /// Order status updates.
    pub orders: bool,
    /// Delivery updates.
    pub delivery: bool,
    /// Promotions.
    pub deals: bool,
    /// Restock reminders.
    pub reminders: bool,
    /// Newsletter.
    pub newsletter: bool,
}

/// Signed-in user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Phone number used for OTP sign-in.
    pub phone: String,
    /// Optional email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// ISO-8601 sign-up date.
    pub member_since: String,
    /// Balance at sign-in time.
    #[serde(default)]
    pub wallet_balance: i64,
    /// Referral code to share.
    #[serde(default)]
    pub referral_code: String,
    /// Notification preferences.
    #[serde(default)]
    pub notifications: NotificationPreferences,
}

/// Response of a successful OTP verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Fresh bearer token.
    pub access_token: AccessToken,
    /// Signed-in user.
    pub user: User,
}

/// Response of the token renewal endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    /// Renewed bearer token.
    pub access_token: AccessToken,
}

/// Acknowledgement of an OTP request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpChallenge {
    /// Server message, e.g. "OTP sent".
    #[serde(default)]
    pub message: String,
    /// Seconds until the code expires.
    pub expires_in: u64,
}

/// Payload submitted to verify an OTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerification {
    /// Phone number the code was sent to.
    pub phone: String,
    /// The code typed by the user.
    pub otp: String,
    /// Display name, on first sign-up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Referral code, on first sign-up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
}

impl OtpVerification {
    /// Verification for an existing account.
    #[must_use]
    pub fn new(phone: impl Into<String>, otp: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            otp: otp.into(),
            name: None,
            referral_code: None,
        }
    }
}
