//! Referral programme payloads

use serde::{Deserialize, Serialize};

/// A user who signed up with the caller's code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Referral {
    /// Display name.
    pub name: String,
    /// ISO-8601 sign-up date.
    pub joined_at: String,
    /// The credit is paid once the referred user orders.
    #[serde(default)]
    pub first_order_placed: bool,
    /// Credit earned for this referral.
    #[serde(default)]
    pub credit_earned: i64,
}

/// Referral code and earnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralStats {
    /// Referral code to share.
    pub code: String,
    /// Number of sign-ups with the code.
    #[serde(default)]
    pub total_referrals: u32,
    /// Credits awaiting a first order.
    #[serde(default)]
    pub pending_credits: i64,
    /// Credits already paid into the wallet.
    #[serde(default)]
    pub paid_credits: i64,
    /// Individual referrals.
    #[serde(default)]
    pub referrals: Vec<Referral>,
}
