//! Settings loading
//!
//! Values come from, lowest priority first: built-in defaults, an optional
//! settings file, then `BAZA_*` environment variables. Nested keys use a
//! double underscore, e.g. `BAZA_TTL__BALANCE_MS=10000`.

use std::path::Path;

use baza_domain::Settings;
use config::{Config, Environment, File};

use crate::error::InfrastructureResult;

/// Prefix of every environment variable read.
pub const ENV_PREFIX: &str = "BAZA";

/// Loads settings from the environment only.
///
/// # Errors
///
/// Returns `InfrastructureError::Config` if a value cannot be parsed or the
/// resulting settings are invalid.
pub fn load_settings() -> InfrastructureResult<Settings> {
    build(None, environment())
}

/// Loads settings from `path` (any format the `config` crate recognises by
/// extension), overridden by the environment. A missing file is ignored.
///
/// # Errors
///
/// Returns `InfrastructureError::Config` if the file is malformed, a value
/// cannot be parsed, or the resulting settings are invalid.
pub fn load_settings_from(path: impl AsRef<Path>) -> InfrastructureResult<Settings> {
    build(Some(path.as_ref()), environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn build(file: Option<&Path>, environment: Environment) -> InfrastructureResult<Settings> {
    let mut builder = Config::builder();
    if let Some(path) = file {
        builder = builder.add_source(File::from(path).required(false));
    }
    let settings: Settings = builder.add_source(environment).build()?.try_deserialize()?;
    settings.validate()?;

    tracing::debug!(
        api_base_url = %settings.api_base_url,
        timeout_ms = settings.timeout_ms,
        "settings loaded"
    );
    Ok(settings)
}
