//! Client settings
//!
//! Endpoint locations, timeouts and per-resource staleness windows for
//! the network-access layer.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// Default API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://baza-chi.vercel.app/v1";

/// How long each kind of resource may be served from cache.
///
/// The windows differ per resource: the balance moves with every order
/// while the catalog changes a few times a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TtlSettings {
    /// Wallet balance TTL in milliseconds.
    #[serde(alias = "balance_ms")]
    pub balance_ms: u64,
    /// Wallet account metadata TTL in milliseconds.
    #[serde(alias = "account_ms")]
    pub account_ms: u64,
    /// Catalog listing TTL in milliseconds.
    #[serde(alias = "catalog_ms")]
    pub catalog_ms: u64,
}

impl TtlSettings {
    /// Wallet balance TTL.
    #[must_use]
    pub const fn balance(&self) -> Duration {
        Duration::from_millis(self.balance_ms)
    }

    /// Wallet account metadata TTL.
    #[must_use]
    pub const fn account(&self) -> Duration {
        Duration::from_millis(self.account_ms)
    }

    /// Catalog listing TTL.
    #[must_use]
    pub const fn catalog(&self) -> Duration {
        Duration::from_millis(self.catalog_ms)
    }
}

impl Default for TtlSettings {
    fn default() -> Self {
        Self {
            balance_ms: 30_000,
            account_ms: 300_000,
            catalog_ms: 300_000,
        }
    }
}

/// Settings for the network-access layer.
///
/// Keys are camelCase on the wire; snake_case aliases accept values coming
/// from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Base URL every request path is joined onto.
    #[serde(alias = "api_base_url")]
    pub api_base_url: String,
    /// Per-request timeout in milliseconds, renewal included.
    #[serde(alias = "timeout_ms")]
    pub timeout_ms: u64,
    /// Path of the token renewal endpoint.
    #[serde(alias = "refresh_path")]
    pub refresh_path: String,
    /// Path of the logout endpoint.
    #[serde(alias = "logout_path")]
    pub logout_path: String,
    /// Interval of the wallet balance poller in milliseconds.
    #[serde(alias = "wallet_poll_interval_ms")]
    pub wallet_poll_interval_ms: u64,
    /// `User-Agent` sent with every request.
    #[serde(alias = "user_agent")]
    pub user_agent: String,
    /// Per-resource cache windows.
    pub ttl: TtlSettings,
}

impl Settings {
    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Wallet poll interval.
    #[must_use]
    pub const fn wallet_poll_interval(&self) -> Duration {
        Duration::from_millis(self.wallet_poll_interval_ms)
    }

    /// Parses the base URL, normalised to end with `/`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the URL cannot be parsed.
    pub fn base_url(&self) -> DomainResult<Url> {
        let mut raw = self.api_base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw).map_err(|e| DomainError::InvalidUrl(format!("{e}: {raw}")))
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns the first invalid value found.
    pub fn validate(&self) -> DomainResult<()> {
        self.base_url()?;
        if self.timeout_ms == 0 {
            return Err(DomainError::InvalidSettings(
                "timeoutMs must be greater than zero".to_string(),
            ));
        }
        if self.wallet_poll_interval_ms == 0 {
            return Err(DomainError::InvalidSettings(
                "walletPollIntervalMs must be greater than zero".to_string(),
            ));
        }
        for (name, path) in [
            ("refreshPath", &self.refresh_path),
            ("logoutPath", &self.logout_path),
        ] {
            if !path.starts_with('/') {
                return Err(DomainError::InvalidSettings(format!(
                    "{name} must start with '/': {path}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_ms: 30_000,
            refresh_path: "/auth/refresh".to_string(),
            logout_path: "/auth/logout".to_string(),
            wallet_poll_interval_ms: 10_000,
            user_agent: format!("baza/{}", env!("CARGO_PKG_VERSION")),
            ttl: TtlSettings::default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.timeout(), Duration::from_secs(30));
        assert_eq!(settings.ttl.balance(), Duration::from_secs(30));
        assert_eq!(settings.wallet_poll_interval(), Duration::from_secs(10));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let settings = Settings {
            api_base_url: "https://api.example.com/v1".to_string(),
            ..Settings::default()
        };
        let url = settings.base_url().unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/");
        assert_eq!(
            url.join("wallet/balance").unwrap().as_str(),
            "https://api.example.com/v1/wallet/balance"
        );
    }

    #[test]
    fn test_invalid_values() {
        let bad_url = Settings {
            api_base_url: "not a url".to_string(),
            ..Settings::default()
        };
        assert!(matches!(bad_url.validate(), Err(DomainError::InvalidUrl(_))));

        let zero_timeout = Settings {
            timeout_ms: 0,
            ..Settings::default()
        };
        assert!(matches!(
            zero_timeout.validate(),
            Err(DomainError::InvalidSettings(_))
        ));

        let relative = Settings {
            refresh_path: "auth/refresh".to_string(),
            ..Settings::default()
        };
        assert!(matches!(
            relative.validate(),
            Err(DomainError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_snake_case_aliases() {
        let settings: Settings = serde_json::from_str(
            r#"{"api_base_url": "http://localhost:3000/v1", "ttl": {"balance_ms": 10}}"#,
        )
        .unwrap();
        assert_eq!(settings.api_base_url, "http://localhost:3000/v1");
        assert_eq!(settings.ttl.balance_ms, 10);
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"timeoutMs": 5000, "ttl": {"balanceMs": 1000}}"#).unwrap();
        assert_eq!(settings.timeout_ms, 5000);
        assert_eq!(settings.ttl.balance_ms, 1000);
        assert_eq!(settings.ttl.catalog_ms, 300_000);
        assert_eq!(settings.refresh_path, "/auth/refresh");
    }
}
