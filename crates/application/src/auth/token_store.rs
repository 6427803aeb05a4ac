//! In-memory credential storage.
//!
//! The bearer token lives only in memory; the long-lived session is
//! carried by the transport's cookie store.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use baza_domain::AccessToken;
use parking_lot::RwLock;

use crate::ports::CredentialStore;

type InvalidationListener = Arc<dyn Fn() + Send + Sync>;

/// Thread-safe in-memory token store.
#[derive(Clone, Default)]
pub struct TokenStore {
    token: Arc<RwLock<Option<AccessToken>>>,
    invalidations: Arc<AtomicU64>,
    listener: Option<InvalidationListener>,
}

impl TokenStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `token`.
    #[must_use]
    pub fn with_token(token: impl Into<AccessToken>) -> Self {
        let store = Self::new();
        *store.token.write() = Some(token.into());
        store
    }

    /// Registers a callback run after the session is invalidated, e.g. to
    /// route the user back to sign-in.
    #[must_use]
    pub fn on_invalidated(mut self, listener: impl Fn() + Send + Sync + 'static) -> Self {
        self.listener = Some(Arc::new(listener));
        self
    }

    /// Whether a token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// How many times the session has been invalidated.
    #[must_use]
    pub fn invalidations(&self) -> u64 {
        self.invalidations.load(Ordering::SeqCst)
    }

    /// Drops the token without counting an invalidation.
    pub fn clear(&self) {
        *self.token.write() = None;
    }
}

impl CredentialStore for TokenStore {
    fn token(&self) -> Option<AccessToken> {
        self.token.read().clone()
    }

    fn set_token(&self, token: AccessToken) {
        *self.token.write() = Some(token);
    }

    fn on_invalidate(&self) {
        self.clear();
        self.invalidations.fetch_add(1, Ordering::SeqCst);
        if let Some(listener) = &self.listener {
            listener();
        }
    }
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore")
            .field("token", &*self.token.read())
            .field("invalidations", &self.invalidations())
            .finish_non_exhaustive()
    }
}
