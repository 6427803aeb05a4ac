//! Transport port

use std::future::Future;

use baza_domain::{ApiRequest, ApiResponse};

use crate::error::TransportError;

/// Port for sending one request to the backend.
///
/// Implementations resolve `request.path` against the configured base
/// URL, apply the per-request timeout and carry the ambient session
/// cookie that the renewal endpoint relies on.
pub trait Transport: Send + Sync {
    /// Sends the request exactly as given.
    ///
    /// # Errors
    ///
    /// A non-2xx response is reported as [`TransportError::Status`] with
    /// the raw body; timeouts and connectivity failures use the other
    /// variants.
    fn send(
        &self,
        request: &ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send;
}
