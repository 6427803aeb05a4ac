//! TTL cache with in-flight deduplication
//!
//! A read returns the stored value while it is fresh. Otherwise it joins
//! the fetch already running for the key, or starts one. Fetches run as
//! detached tasks: a reader that goes away does not cancel the fetch, and
//! the value is still stored for the next reader.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use baza_domain::CacheKey;
use futures::FutureExt;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use super::entry::{CacheEntry, ErasedValue, InFlightFetch, SharedFetch};
use crate::error::{ApiError, ApiResult};
use crate::ports::Clock;

/// Per-read options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Skip the freshness check. A fetch already in flight is still joined.
    pub force: bool,
}

impl ReadOptions {
    /// Options for a forced refresh.
    #[must_use]
    pub const fn forced() -> Self {
        Self { force: true }
    }
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<CacheKey, CacheEntry>,
    in_flight: HashMap<CacheKey, InFlightFetch>,
    next_generation: u64,
}

enum ReadPlan<T> {
    Hit(T),
    Join(SharedFetch),
    Start {
        generation: u64,
        outcome: SharedFetch,
        deliver: oneshot::Sender<Result<ErasedValue, ApiError>>,
    },
}

/// Shared read-through cache keyed by [`CacheKey`].
///
/// Values of different types live side by side; a read asks for a type
/// and treats an entry of another type as a miss.
#[derive(Clone)]
pub struct CacheLayer {
    state: Arc<Mutex<CacheState>>,
    clock: Arc<dyn Clock>,
}

impl CacheLayer {
    /// Creates an empty cache measuring age with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(Mutex::new(CacheState::default())),
            clock,
        }
    }

    /// Returns the value for `key`, fetching it if missing or stale.
    ///
    /// Concurrent reads of a key share one fetch and all receive its
    /// outcome. Only successful outcomes are stored.
    ///
    /// # Errors
    ///
    /// Returns the fetch error, delivered to every reader that joined it.
    pub async fn read<T, F, Fut>(
        &self,
        key: &CacheKey,
        ttl: Duration,
        options: ReadOptions,
        fetcher: F,
    ) -> ApiResult<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = ApiResult<T>> + Send + 'static,
    {
        let outcome = match self.plan::<T>(key, ttl, options) {
            ReadPlan::Hit(value) => {
                tracing::trace!(%key, "cache hit");
                return Ok(value);
            }
            ReadPlan::Join(outcome) => {
                tracing::debug!(%key, "joining in-flight fetch");
                outcome
            }
            ReadPlan::Start {
                generation,
                outcome,
                deliver,
            } => {
                tracing::debug!(%key, force = options.force, "fetching");
                let settlement = Settlement {
                    cache: self.clone(),
                    key: key.clone(),
                    generation,
                    deliver: Some(deliver),
                };
                let fetch = fetcher();
                tokio::spawn(async move {
                    let result = fetch.await.map(|value| Arc::new(value) as ErasedValue);
                    settlement.complete(result);
                });
                outcome
            }
        };

        let value = outcome.await?;
        value.downcast_ref::<T>().cloned().ok_or_else(|| {
            ApiError::Decode(format!("value fetched for {key} has an unexpected type"))
        })
    }

    /// Returns the stored value for `key` if it is fresh, without fetching.
    #[must_use]
    pub fn peek<T: Clone + 'static>(&self, key: &CacheKey, ttl: Duration) -> Option<T> {
        let now = self.clock.now();
        let state = self.state.lock();
        state
            .entries
            .get(key)
            .filter(|entry| entry.is_fresh(now, ttl))
            .and_then(CacheEntry::downcast::<T>)
    }

    /// Drops the entry for `key` and detaches any fetch in flight for it.
    ///
    /// Readers already waiting on the detached fetch still get its outcome,
    /// but the outcome is not stored.
    pub fn invalidate(&self, key: &CacheKey) {
        let mut state = self.state.lock();
        state.entries.remove(key);
        state.in_flight.remove(key);
        tracing::debug!(%key, "invalidated");
    }

    /// Invalidates every key of `resource`, whatever its parameters.
    pub fn invalidate_resource(&self, resource: &str) {
        let mut state = self.state.lock();
        state.entries.retain(|key, _| key.resource() != resource);
        state.in_flight.retain(|key, _| key.resource() != resource);
        tracing::debug!(resource, "invalidated resource");
    }

    /// Drops every entry and detaches every fetch in flight.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        let entries = state.entries.len();
        state.entries.clear();
        state.in_flight.clear();
        tracing::debug!(entries, "cache cleared");
    }

    /// Number of stored entries, fresh or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    /// Whether a fetch is registered for `key`.
    #[must_use]
    pub fn is_fetching(&self, key: &CacheKey) -> bool {
        self.state.lock().in_flight.contains_key(key)
    }

    fn plan<T: Clone + 'static>(
        &self,
        key: &CacheKey,
        ttl: Duration,
        options: ReadOptions,
    ) -> ReadPlan<T> {
        let now = self.clock.now();
        let mut state = self.state.lock();

        if !options.force
            && let Some(value) = state
                .entries
                .get(key)
                .filter(|entry| entry.is_fresh(now, ttl))
                .and_then(CacheEntry::downcast::<T>)
        {
            return ReadPlan::Hit(value);
        }

        if let Some(in_flight) = state.in_flight.get(key) {
            return ReadPlan::Join(in_flight.outcome.clone());
        }

        let (deliver, receiver) = oneshot::channel();
        let outcome: SharedFetch = async move {
            receiver.await.unwrap_or_else(|_| {
                Err(ApiError::Interrupted(
                    "fetch ended without a result".to_string(),
                ))
            })
        }
        .boxed()
        .shared();

        state.next_generation += 1;
        let generation = state.next_generation;
        state.in_flight.insert(
            key.clone(),
            InFlightFetch {
                generation,
                outcome: outcome.clone(),
            },
        );

        ReadPlan::Start {
            generation,
            outcome,
            deliver,
        }
    }

    /// Removes the registration and stores `value`, unless the registration
    /// was already removed by `invalidate` or `clear`.
    fn settle(&self, key: &CacheKey, generation: u64, value: Option<&ErasedValue>) {
        let now = self.clock.now();
        let mut state = self.state.lock();

        let current = state
            .in_flight
            .get(key)
            .is_some_and(|fetch| fetch.generation == generation);
        if !current {
            tracing::debug!(%key, "fetch settled after being detached, not stored");
            return;
        }

        state.in_flight.remove(key);
        if let Some(value) = value {
            state.entries.insert(
                key.clone(),
                CacheEntry {
                    value: Arc::clone(value),
                    stored_at: now,
                },
            );
        }
    }
}

/// Settles a fetch; if dropped unsettled, the registration is released.
struct Settlement {
    cache: CacheLayer,
    key: CacheKey,
    generation: u64,
    deliver: Option<oneshot::Sender<Result<ErasedValue, ApiError>>>,
}

impl Settlement {
    fn complete(mut self, result: Result<ErasedValue, ApiError>) {
        if let Err(error) = &result {
            tracing::warn!(key = %self.key, %error, "fetch failed");
        }
        self.cache
            .settle(&self.key, self.generation, result.as_ref().ok());
        if let Some(deliver) = self.deliver.take() {
            // Nobody left waiting is fine; the value is stored regardless.
            let _ = deliver.send(result);
        }
    }
}

impl Drop for Settlement {
    fn drop(&mut self) {
        if self.deliver.is_some() {
            self.cache.settle(&self.key, self.generation, None);
        }
    }
}
