//! Session facade
//!
//! Wires one transport, one credential store, one clock and the settings
//! into a single coordinator and a single cache, and hands out the
//! resource services built on them.

use std::sync::Arc;

use baza_domain::{AccessToken, ApiRequest, Settings};

use crate::auth::AuthCoordinator;
use crate::cache::CacheLayer;
use crate::ports::{Clock, CredentialStore, Transport};
use crate::polling::PollingController;
use crate::services::{
    AuthService, CatalogService, OrderService, ReferralService, SupportService, UserService,
    WalletService,
};

/// Credential store decorator that empties the cache when the session ends.
struct SessionCredentials {
    inner: Arc<dyn CredentialStore>,
    cache: CacheLayer,
}

impl CredentialStore for SessionCredentials {
    fn token(&self) -> Option<AccessToken> {
        self.inner.token()
    }

    fn set_token(&self, token: AccessToken) {
        self.inner.set_token(token);
    }

    fn on_invalidate(&self) {
        self.cache.clear();
        self.inner.on_invalidate();
    }
}

/// One signed-in (or signing-in) user's view of the backend.
pub struct Session<T: Transport> {
    api: AuthCoordinator<T>,
    cache: CacheLayer,
    settings: Settings,
}

impl<T: Transport + 'static> Session<T> {
    /// Builds a session. Data cached for the user is dropped whenever
    /// `credentials` is invalidated through this session.
    pub fn new(
        transport: Arc<T>,
        credentials: Arc<dyn CredentialStore>,
        clock: Arc<dyn Clock>,
        settings: Settings,
    ) -> Self {
        let cache = CacheLayer::new(clock);
        let credentials: Arc<dyn CredentialStore> = Arc::new(SessionCredentials {
            inner: credentials,
            cache: cache.clone(),
        });
        let api = AuthCoordinator::new(
            transport,
            credentials,
            settings.refresh_path.clone(),
        );
        Self {
            api,
            cache,
            settings,
        }
    }

    /// The coordinator, for calls no service covers.
    #[must_use]
    pub const fn api(&self) -> &AuthCoordinator<T> {
        &self.api
    }

    /// The shared cache.
    #[must_use]
    pub const fn cache(&self) -> &CacheLayer {
        &self.cache
    }

    /// The settings this session was built with.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Product listings.
    #[must_use]
    pub fn catalog(&self) -> CatalogService<T> {
        CatalogService::new(self.api.clone(), self.cache.clone(), self.settings.ttl.catalog())
    }

    /// Wallet endpoints and card top-ups.
    #[must_use]
    pub fn wallet(&self) -> WalletService<T> {
        WalletService::new(self.api.clone(), self.cache.clone(), self.settings.ttl)
    }

    /// OTP sign-in.
    #[must_use]
    pub fn auth(&self) -> AuthService<T> {
        AuthService::new(self.api.clone())
    }

    /// Checkout and order history. Shares the cache so a placed order
    /// drops the cached balance.
    #[must_use]
    pub fn orders(&self) -> OrderService<T> {
        OrderService::new(self.api.clone(), self.cache.clone())
    }

    /// Profile, notification preferences and addresses.
    #[must_use]
    pub fn user(&self) -> UserService<T> {
        UserService::new(self.api.clone())
    }

    /// Referral stats.
    #[must_use]
    pub fn referral(&self) -> ReferralService<T> {
        ReferralService::new(self.api.clone())
    }

    /// Support chat.
    #[must_use]
    pub fn support(&self) -> SupportService<T> {
        SupportService::new(self.api.clone())
    }

    /// A stopped balance poller at the configured interval.
    #[must_use]
    pub fn wallet_poller(&self) -> PollingController {
        self.wallet()
            .balance_poller(self.settings.wallet_poll_interval())
    }

    /// Whether a token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.api.credentials().token().is_some()
    }

    /// Signs out.
    ///
    /// The server is told first so it can revoke the renewal session; a
    /// failure there is logged and ignored. Local state is always cleared.
    pub async fn logout(&self) {
        let request = ApiRequest::post(self.settings.logout_path.as_str()).without_retry();
        match self.api.execute(request).await {
            Ok(_) => tracing::debug!("server session revoked"),
            Err(error) => tracing::warn!(%error, "logout request failed, clearing local session anyway"),
        }
        self.api.credentials().on_invalidate();
        tracing::info!("signed out");
    }
}
