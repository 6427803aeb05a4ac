//! Production wiring

use std::sync::Arc;

use baza_application::{CredentialStore, Session};
use baza_domain::Settings;

use crate::adapters::{ReqwestTransport, SystemClock};
use crate::error::InfrastructureResult;

/// Builds a session talking to the real backend.
///
/// # Errors
///
/// Returns an error if the settings are invalid or the HTTP client cannot
/// be built.
pub fn connect(
    settings: Settings,
    credentials: Arc<dyn CredentialStore>,
) -> InfrastructureResult<Session<ReqwestTransport>> {
    let transport = ReqwestTransport::new(&settings)?;
    tracing::info!(base_url = %transport.base_url(), "connecting to Baza API");
    Ok(Session::new(
        Arc::new(transport),
        credentials,
        Arc::new(SystemClock),
        settings,
    ))
}
