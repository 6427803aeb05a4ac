//! Wallet payloads
//!
//! Balance, virtual account and top-up types served by `/wallet/*`.
//! Amounts are whole naira; the debit side of a transaction carries a
//! positive amount and a `Debit*` type.

use serde::{Deserialize, Serialize};

/// Current balance plus the funding account details.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalance {
    /// Spendable balance.
    pub balance: i64,
    /// Virtual account number for bank transfers.
    #[serde(default)]
    pub account_number: String,
    /// Bank hosting the virtual account.
    #[serde(default)]
    pub bank_name: String,
    /// Name on the virtual account.
    #[serde(default)]
    pub account_name: String,
}

/// Virtual account assignment as returned by `/wallet/account`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAccount {
    /// Virtual account number, empty until assigned.
    #[serde(default)]
    pub account_number: String,
    /// Bank hosting the account.
    #[serde(default)]
    pub bank_name: String,
    /// Name on the account.
    #[serde(default)]
    pub account_name: String,
    /// Whether a virtual account has been provisioned.
    #[serde(default)]
    pub assigned: bool,
    /// Balance at the time of the call.
    pub wallet_balance: i64,
}

/// Kind of wallet movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WalletTxnType {
    /// Bank transfer into the virtual account.
    CreditTransfer,
    /// Card top-up through the payment provider.
    CreditCard,
    /// Referral reward.
    CreditReferral,
    /// Payment for an order.
    DebitOrder,
    /// Refund of a previous debit.
    DebitRefund,
}

impl WalletTxnType {
    /// Returns true for movements that increase the balance.
    #[must_use]
    pub const fn is_credit(self) -> bool {
        matches!(
            self,
            Self::CreditTransfer | Self::CreditCard | Self::CreditReferral
        )
    }
}

/// One wallet movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletTransaction {
    /// Transaction id.
    pub id: String,
    /// Amount moved.
    pub amount: i64,
    /// Movement kind.
    #[serde(rename = "type")]
    pub kind: WalletTxnType,
    /// Optional human description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Provider or internal reference.
    pub reference: String,
    /// ISO-8601 creation time.
    pub created_at: String,
}

/// Pagination block of list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Total number of records.
    pub total: u64,
    /// Total number of pages, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    /// Whether another page follows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_next: Option<bool>,
    /// Whether a previous page exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_prev: Option<bool>,
}

/// A page of wallet transactions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    /// Transactions on this page, newest first.
    #[serde(default)]
    pub transactions: Vec<WalletTransaction>,
    /// Pagination, when the server includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Public configuration of the card payment provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaystackConfig {
    /// Publishable key used by the checkout page.
    pub public_key: String,
}

/// Result of starting a card top-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopupInitiation {
    /// Checkout page the caller hands the user to.
    pub authorization_url: String,
    /// Provider access code, when issued.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_code: Option<String>,
    /// Reference used to verify the payment afterwards.
    pub reference: String,
}

/// Result of verifying a top-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopupVerification {
    /// Provider status, `success` once funds are credited.
    pub status: String,
    /// Amount credited.
    #[serde(default)]
    pub amount: i64,
    /// Balance after crediting.
    #[serde(default)]
    pub wallet_balance: i64,
}

impl TopupVerification {
    /// Returns true when the payment was confirmed and credited.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case("success")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_balance_from_wire() {
        let balance: WalletBalance = serde_json::from_value(serde_json::json!({
            "balance": 12500,
            "accountNumber": "0123456789",
            "bankName": "Wema Bank",
            "accountName": "Baza / Ada"
        }))
        .unwrap();
        assert_eq!(balance.balance, 12500);
        assert_eq!(balance.bank_name, "Wema Bank");
    }

    #[test]
    fn test_transaction_type_field() {
        let txn: WalletTransaction = serde_json::from_value(serde_json::json!({
            "id": "t1",
            "amount": 4000,
            "type": "DEBIT_ORDER",
            "reference": "ord_1",
            "createdAt": "2026-01-02T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(txn.kind, WalletTxnType::DebitOrder);
        assert!(!txn.kind.is_credit());
        assert_eq!(txn.description, None);
    }

    #[test]
    fn test_verification_status() {
        let verified = TopupVerification {
            status: "SUCCESS".to_string(),
            amount: 5000,
            wallet_balance: 17500,
        };
        assert!(verified.is_success());

        let pending = TopupVerification {
            status: "pending".to_string(),
            ..verified
        };
        assert!(!pending.is_success());
    }
}
