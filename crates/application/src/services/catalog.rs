//! Product catalog listings

use std::time::Duration;

use baza_domain::cache_key::normalize_category;
use baza_domain::{
    ApiRequest, ApiResponse, Bundle, CacheKey, MealPack, ReadyEatItem, RestockListing, SnackItem,
};

use super::envelope_field;
use crate::auth::AuthCoordinator;
use crate::cache::{CacheLayer, ReadOptions};
use crate::error::{ApiError, ApiResult};
use crate::ports::Transport;

const BUNDLES: &str = "/products/bundles";
const MEAL_PACKS: &str = "/products/mealpacks";
const READY_EAT: &str = "/products/readyeat";
const SNACKS: &str = "/products/snacks";
const RESTOCK: &str = "/products/restock";

/// Cached access to the `/products/*` listings.
pub struct CatalogService<T: Transport> {
    api: AuthCoordinator<T>,
    cache: CacheLayer,
    ttl: Duration,
}

impl<T: Transport> Clone for CatalogService<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            cache: self.cache.clone(),
            ttl: self.ttl,
        }
    }
}

/// Outcome of [`CatalogService::prefetch`], one line per listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefetchReport {
    /// Listings now in the cache.
    pub loaded: Vec<&'static str>,
    /// Listings that failed, with the reason.
    pub failed: Vec<(&'static str, ApiError)>,
}

impl PrefetchReport {
    /// Whether every listing loaded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    fn record<V>(&mut self, listing: &'static str, result: ApiResult<V>) {
        match result {
            Ok(_) => self.loaded.push(listing),
            Err(error) => self.failed.push((listing, error)),
        }
    }
}

impl<T: Transport + 'static> CatalogService<T> {
    /// Creates the service; listings stay fresh for `ttl`.
    pub const fn new(api: AuthCoordinator<T>, cache: CacheLayer, ttl: Duration) -> Self {
        Self { api, cache, ttl }
    }

    /// Stock-up bundles.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be fetched or decoded.
    pub async fn bundles(&self, options: ReadOptions) -> ApiResult<Vec<Bundle>> {
        self.cached(
            key(BUNDLES),
            ApiRequest::get(BUNDLES),
            |response| envelope_field(response, "bundles"),
            options,
        )
        .await
    }

    /// Meal packs.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be fetched or decoded.
    pub async fn meal_packs(&self, options: ReadOptions) -> ApiResult<Vec<MealPack>> {
        self.cached(
            key(MEAL_PACKS),
            ApiRequest::get(MEAL_PACKS),
            |response| envelope_field(response, "mealPacks"),
            options,
        )
        .await
    }

    /// Ready-to-eat kitchen items.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be fetched or decoded.
    pub async fn ready_eat(&self, options: ReadOptions) -> ApiResult<Vec<ReadyEatItem>> {
        self.cached(
            key(READY_EAT),
            ApiRequest::get(READY_EAT),
            |response| envelope_field(response, "items"),
            options,
        )
        .await
    }

    /// Snacks and drinks, optionally filtered by category. `All` means no
    /// filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be fetched or decoded.
    pub async fn snacks(
        &self,
        category: Option<&str>,
        options: ReadOptions,
    ) -> ApiResult<Vec<SnackItem>> {
        let category = normalize_category(category);
        self.cached(
            key(SNACKS).optional_param("category", category),
            ApiRequest::get(SNACKS).with_optional_query("category", category),
            |response| envelope_field(response, "items"),
            options,
        )
        .await
    }

    /// Pantry staples, optionally filtered by category and a search term.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be fetched or decoded.
    pub async fn restock(
        &self,
        category: Option<&str>,
        query: Option<&str>,
        options: ReadOptions,
    ) -> ApiResult<RestockListing> {
        let category = normalize_category(category);
        let query = query.map(str::trim).filter(|q| !q.is_empty());
        self.cached(
            key(RESTOCK)
                .optional_param("category", category)
                .optional_param("q", query),
            ApiRequest::get(RESTOCK)
                .with_optional_query("category", category)
                .with_optional_query("q", query),
            |response| Ok(response.json()?),
            options,
        )
        .await
    }

    /// Loads every unfiltered listing concurrently.
    ///
    /// Each listing settles on its own; one failure does not stop the rest.
    pub async fn prefetch(&self) -> PrefetchReport {
        let options = ReadOptions::default();
        let (bundles, meal_packs, ready_eat, snacks, restock) = tokio::join!(
            self.bundles(options),
            self.meal_packs(options),
            self.ready_eat(options),
            self.snacks(None, options),
            self.restock(None, None, options),
        );

        let mut report = PrefetchReport::default();
        report.record("bundles", bundles);
        report.record("meal_packs", meal_packs);
        report.record("ready_eat", ready_eat);
        report.record("snacks", snacks);
        report.record("restock", restock);

        if report.is_complete() {
            tracing::debug!("catalog prefetched");
        } else {
            tracing::warn!(failed = report.failed.len(), "catalog prefetch incomplete");
        }
        report
    }

    /// Drops every cached listing.
    pub fn invalidate(&self) {
        for path in [BUNDLES, MEAL_PACKS, READY_EAT, SNACKS, RESTOCK] {
            self.cache.invalidate_resource(key(path).resource());
        }
    }

    async fn cached<V>(
        &self,
        key: CacheKey,
        request: ApiRequest,
        decode: fn(&ApiResponse) -> ApiResult<V>,
        options: ReadOptions,
    ) -> ApiResult<V>
    where
        V: Clone + Send + Sync + 'static,
    {
        let api = self.api.clone();
        self.cache
            .read(&key, self.ttl, options, move || async move {
                let response = api.execute(request).await?;
                decode(&response)
            })
            .await
    }
}

fn key(path: &str) -> CacheKey {
    CacheKey::new(path.trim_start_matches('/'))
}
