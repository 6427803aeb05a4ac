//! Cache keys for read-mostly resources
//!
//! A key is the resource name plus every parameter that changes the
//! server's answer, e.g. `snacks?category=Drinks`. Parameters that the
//! client never sends to the server (empty strings and the catalog's
//! `All` category) are left out so equivalent reads share one entry.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

/// Key identifying one cached resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for a resource without parameters.
    #[must_use]
    pub fn new(resource: impl Into<String>) -> Self {
        Self(resource.into())
    }

    /// Appends a parameter. Empty values are ignored.
    #[must_use]
    pub fn param(mut self, name: &str, value: &str) -> Self {
        if value.is_empty() {
            return self;
        }
        let separator = if self.0.contains('?') { '&' } else { '?' };
        self.0.push(separator);
        self.0.push_str(name);
        self.0.push('=');
        self.0.push_str(value);
        self
    }

    /// Appends an optional parameter.
    #[must_use]
    pub fn optional_param(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.param(name, value),
            None => self,
        }
    }

    /// Appends a catalog category, skipping the `All` sentinel.
    #[must_use]
    pub fn category(self, category: Option<&str>) -> Self {
        self.optional_param("category", normalize_category(category))
    }

    /// The key as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The resource part of the key, without parameters.
    #[must_use]
    pub fn resource(&self) -> &str {
        self.0.split_once('?').map_or(self.0.as_str(), |(resource, _)| resource)
    }
}

/// Drops the `All` sentinel and empty categories.
#[must_use]
pub fn normalize_category(category: Option<&str>) -> Option<&str> {
    category.filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CacheKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
