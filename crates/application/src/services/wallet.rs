//! Wallet balance, account and card top-ups

use std::time::Duration;

use baza_domain::{
    ApiRequest, CacheKey, PaystackConfig, TopupInitiation, TopupVerification, TransactionPage,
    TtlSettings, WalletAccount, WalletBalance,
};

use crate::auth::AuthCoordinator;
use crate::cache::{CacheLayer, ReadOptions};
use crate::error::ApiResult;
use crate::polling::PollingController;
use crate::ports::{PaymentProvider, TopupRequest, Transport};

const BALANCE: &str = "/wallet/balance";
const ACCOUNT: &str = "/wallet/account";
const TRANSACTIONS: &str = "/wallet/transactions";
const PAYSTACK_CONFIG: &str = "/wallet/paystack-config";
const TOPUP: &str = "/wallet/topup";
const VERIFY_TOPUP: &str = "/wallet/verify-topup";

/// Wallet endpoints. Balance and account are cached with their own TTLs.
pub struct WalletService<T: Transport> {
    api: AuthCoordinator<T>,
    cache: CacheLayer,
    ttl: TtlSettings,
}

impl<T: Transport> Clone for WalletService<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            cache: self.cache.clone(),
            ttl: self.ttl,
        }
    }
}

impl<T: Transport + 'static> WalletService<T> {
    /// Creates the service.
    pub const fn new(api: AuthCoordinator<T>, cache: CacheLayer, ttl: TtlSettings) -> Self {
        Self { api, cache, ttl }
    }

    /// Cache key of the balance.
    #[must_use]
    pub fn balance_key() -> CacheKey {
        CacheKey::new("wallet/balance")
    }

    /// Cache key of the account details.
    #[must_use]
    pub fn account_key() -> CacheKey {
        CacheKey::new("wallet/account")
    }

    /// Current balance and funding account.
    ///
    /// # Errors
    ///
    /// Returns an error if the balance cannot be fetched or decoded.
    pub async fn balance(&self, options: ReadOptions) -> ApiResult<WalletBalance> {
        let api = self.api.clone();
        self.cache
            .read(&Self::balance_key(), self.ttl.balance(), options, move || async move {
                api.execute_json(ApiRequest::get(BALANCE)).await
            })
            .await
    }

    /// Virtual account assignment.
    ///
    /// # Errors
    ///
    /// Returns an error if the account cannot be fetched or decoded.
    pub async fn account(&self, options: ReadOptions) -> ApiResult<WalletAccount> {
        let api = self.api.clone();
        self.cache
            .read(&Self::account_key(), self.ttl.account(), options, move || async move {
                api.execute_json(ApiRequest::get(ACCOUNT)).await
            })
            .await
    }

    /// One page of transactions, newest first. Not cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be fetched or decoded.
    pub async fn transactions(&self, page: u32, limit: u32) -> ApiResult<TransactionPage> {
        let request = ApiRequest::get(TRANSACTIONS)
            .with_query("page", page)
            .with_query("limit", limit);
        self.api.execute_json(request).await
    }

    /// Public key for the card checkout.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be fetched or decoded.
    pub async fn paystack_config(&self) -> ApiResult<PaystackConfig> {
        self.api.execute_json(ApiRequest::get(PAYSTACK_CONFIG)).await
    }

    /// Builds a stopped poller that force-refreshes the balance every
    /// `interval`.
    #[must_use]
    pub fn balance_poller(&self, interval: Duration) -> PollingController {
        let wallet = self.clone();
        PollingController::new("wallet-balance", interval, move || {
            let wallet = wallet.clone();
            async move {
                wallet.balance(ReadOptions::forced()).await?;
                Ok(())
            }
        })
    }
}

impl<T: Transport + 'static> PaymentProvider for WalletService<T> {
    async fn initiate(&self, request: &TopupRequest) -> ApiResult<TopupInitiation> {
        let initiation: TopupInitiation = self
            .api
            .execute_json(ApiRequest::post(TOPUP).with_json(request)?)
            .await?;
        tracing::info!(reference = %initiation.reference, amount = request.amount, "top-up initiated");
        Ok(initiation)
    }

    async fn verify(&self, reference: &str) -> ApiResult<TopupVerification> {
        let request = ApiRequest::get(VERIFY_TOPUP).with_query("reference", reference);
        let verification: TopupVerification = self.api.execute_json(request).await?;

        if verification.is_success() {
            self.cache.invalidate(&Self::balance_key());
            self.cache.invalidate(&Self::account_key());
            tracing::info!(reference, amount = verification.amount, "top-up confirmed");
        } else {
            tracing::debug!(reference, status = %verification.status, "top-up not confirmed yet");
        }
        Ok(verification)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::auth::TokenStore;
    use crate::ports::{Clock, TOPUP_CALLBACK_URL};
    use crate::test_support::{FakeBackend, ManualClock, REFRESH_PATH};

    const LATENCY: Duration = Duration::from_millis(20);

    fn service(backend: FakeBackend) -> (WalletService<FakeBackend>, Arc<FakeBackend>) {
        let backend = Arc::new(backend.accepting("t1"));
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::new());
        let api = AuthCoordinator::new(
            Arc::clone(&backend),
            Arc::new(TokenStore::with_token("t1")),
            REFRESH_PATH,
        );
        (
            WalletService::new(api, CacheLayer::new(clock), TtlSettings::default()),
            backend,
        )
    }

    fn balance_body(balance: i64) -> serde_json::Value {
        json!({
            "balance": balance,
            "accountNumber": "9012345678",
            "bankName": "Wema Bank",
            "accountName": "Baza / Ada"
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_balance_is_cached() {
        let (wallet, backend) =
            service(FakeBackend::new(LATENCY).route(BALANCE, balance_body(12_500)));

        let balance = wallet.balance(ReadOptions::default()).await.unwrap();
        assert_eq!(balance.balance, 12_500);
        assert_eq!(balance.bank_name, "Wema Bank");

        wallet.balance(ReadOptions::default()).await.unwrap();
        assert_eq!(backend.calls(BALANCE), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_verification_invalidates_balance_and_account() {
        let (wallet, backend) = service(
            FakeBackend::new(LATENCY)
                .route(BALANCE, balance_body(1_000))
                .route(
                    ACCOUNT,
                    json!({ "accountNumber": "9012345678", "assigned": true, "walletBalance": 1000 }),
                )
                .route(
                    VERIFY_TOPUP,
                    json!({ "status": "success", "amount": 5000, "walletBalance": 6000 }),
                ),
        );

        wallet.balance(ReadOptions::default()).await.unwrap();
        wallet.account(ReadOptions::default()).await.unwrap();

        let verification = wallet.verify("ref_123").await.unwrap();
        assert!(verification.is_success());
        assert_eq!(
            backend.requests().last().unwrap().query,
            vec![("reference".to_string(), "ref_123".to_string())]
        );

        wallet.balance(ReadOptions::default()).await.unwrap();
        wallet.account(ReadOptions::default()).await.unwrap();
        assert_eq!(backend.calls(BALANCE), 2);
        assert_eq!(backend.calls(ACCOUNT), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_verification_keeps_cache() {
        let (wallet, backend) = service(
            FakeBackend::new(LATENCY)
                .route(BALANCE, balance_body(1_000))
                .route(VERIFY_TOPUP, json!({ "status": "pending" })),
        );

        wallet.balance(ReadOptions::default()).await.unwrap();
        let verification = wallet.verify("ref_456").await.unwrap();
        assert!(!verification.is_success());

        wallet.balance(ReadOptions::default()).await.unwrap();
        assert_eq!(backend.calls(BALANCE), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_initiate_posts_amount_and_callback() {
        let (wallet, backend) = service(FakeBackend::new(LATENCY).route(
            TOPUP,
            json!({
                "authorizationUrl": "https://checkout.paystack.com/abc",
                "accessCode": "abc",
                "reference": "ref_789"
            }),
        ));

        let initiation = wallet.initiate(&TopupRequest::new(5_000)).await.unwrap();

        assert_eq!(initiation.reference, "ref_789");
        assert_eq!(
            backend.requests()[0].body,
            Some(json!({ "amount": 5000, "callbackUrl": TOPUP_CALLBACK_URL }))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_transactions_are_not_cached() {
        let (wallet, backend) = service(FakeBackend::new(LATENCY).route(
            TRANSACTIONS,
            json!({
                "transactions": [{
                    "id": "t1", "amount": 5000, "type": "CREDIT_CARD",
                    "reference": "ref_1", "createdAt": "2026-01-01T00:00:00Z"
                }],
                "pagination": { "page": 2, "limit": 20, "total": 21 }
            }),
        ));

        let page = wallet.transactions(2, 20).await.unwrap();
        wallet.transactions(2, 20).await.unwrap();

        assert_eq!(page.transactions.len(), 1);
        assert!(page.transactions[0].kind.is_credit());
        assert_eq!(backend.calls(TRANSACTIONS), 2);
        assert_eq!(
            backend.requests()[0].query,
            vec![
                ("page".to_string(), "2".to_string()),
                ("limit".to_string(), "20".to_string()),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_paystack_config_is_fetched_with_bearer() {
        let (wallet, backend) = service(
            FakeBackend::new(LATENCY).route(PAYSTACK_CONFIG, json!({ "publicKey": "pk_test_x" })),
        );

        let config = wallet.paystack_config().await.unwrap();

        assert_eq!(config.public_key, "pk_test_x");
        assert_eq!(backend.requests()[0].bearer(), Some("t1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_balance_poller_refreshes_each_tick() {
        let (wallet, backend) =
            service(FakeBackend::new(LATENCY).route(BALANCE, balance_body(100)));
        wallet.balance(ReadOptions::default()).await.unwrap();

        let interval = Duration::from_secs(10);
        let poller = wallet.balance_poller(interval);
        poller.start();
        tokio::time::sleep(interval * 3 + LATENCY * 2).await;
        poller.stop();

        assert_eq!(backend.calls(BALANCE), 4);
    }
}
