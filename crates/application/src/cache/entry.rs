//! Stored values and in-flight fetch registrations

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use futures::future::{BoxFuture, Shared};

use crate::error::ApiError;

/// A cached value of any resource type.
pub(crate) type ErasedValue = Arc<dyn Any + Send + Sync>;

/// The outcome of one fetch, awaitable by any number of readers.
pub(crate) type SharedFetch = Shared<BoxFuture<'static, Result<ErasedValue, ApiError>>>;

pub(crate) struct CacheEntry {
    pub(crate) value: ErasedValue,
    pub(crate) stored_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Fresh while strictly younger than `ttl`.
    pub(crate) fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let ttl = TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX);
        now.signed_duration_since(self.stored_at) < ttl
    }

    pub(crate) fn downcast<T: Clone + 'static>(&self) -> Option<T> {
        self.value.downcast_ref::<T>().cloned()
    }
}

pub(crate) struct InFlightFetch {
    /// Distinguishes this registration from a later fetch of the same key.
    pub(crate) generation: u64,
    pub(crate) outcome: SharedFetch,
}
