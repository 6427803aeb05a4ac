//! Bearer attachment and 401 recovery.
//!
//! Every authenticated request carries the current token. A 401 sends the
//! request into the active renewal wave (or opens one), and the request is
//! replayed exactly once with the renewed token. However many requests
//! fail together, the renewal endpoint is called once per wave.

use std::sync::Arc;

use baza_domain::{AccessToken, ApiRequest, ApiResponse, RefreshResponse};
use serde::de::DeserializeOwned;

use super::wave::{Admission, RenewalOutcome, RenewalState};
use crate::error::{ApiError, ApiResult, AuthError};
use crate::ports::{CredentialStore, Transport};

/// Single entry point for backend calls.
///
/// Cloning is cheap and clones share the renewal wave.
pub struct AuthCoordinator<T: Transport> {
    transport: Arc<T>,
    credentials: Arc<dyn CredentialStore>,
    refresh_path: Arc<str>,
    renewal: Arc<RenewalState>,
}

impl<T: Transport> Clone for AuthCoordinator<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            credentials: Arc::clone(&self.credentials),
            refresh_path: Arc::clone(&self.refresh_path),
            renewal: Arc::clone(&self.renewal),
        }
    }
}

impl<T: Transport + 'static> AuthCoordinator<T> {
    /// Creates a coordinator renewing tokens at `refresh_path`.
    pub fn new(
        transport: Arc<T>,
        credentials: Arc<dyn CredentialStore>,
        refresh_path: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            credentials,
            refresh_path: Arc::from(refresh_path.into()),
            renewal: Arc::new(RenewalState::default()),
        }
    }

    /// The credential store tokens are read from.
    #[must_use]
    pub const fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// The underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Whether a renewal wave is in progress.
    #[must_use]
    pub fn is_renewing(&self) -> bool {
        self.renewal.is_active()
    }

    /// Sends `request`, recovering once from an expired token.
    ///
    /// # Errors
    ///
    /// - `ApiError::Auth(RenewalFailed)` if the token could not be renewed;
    ///   the session has been invalidated.
    /// - `ApiError::Auth(Unauthorized)` if the replay was rejected too.
    /// - `ApiError::Server` for any other non-success status.
    /// - `ApiError::Transport` for timeouts and connectivity failures.
    pub async fn execute(&self, mut request: ApiRequest) -> ApiResult<ApiResponse> {
        request.validate()?;
        if request.authenticated {
            match self.credentials.token() {
                Some(token) => request.set_bearer(&token),
                None => request.clear_bearer(),
            }
        }

        tracing::debug!(
            request_id = %request.id,
            method = %request.method,
            path = %request.path,
            "sending request"
        );

        let result = self.transport.send(&request).await;
        match result {
            Err(error) if error.is_unauthorized() && request.authenticated => {
                if request.retried {
                    return Err(AuthError::Unauthorized.into());
                }
                request.retried = true;
                let token = self.token_for_replay(&request).await?;
                request.set_bearer(&token);
                self.replay(&request).await
            }
            other => other.map_err(ApiError::from),
        }
    }

    /// Sends `request` and decodes the success body as `R`.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute), plus `ApiError::Decode` when the
    /// body does not match `R`.
    pub async fn execute_json<R: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<R> {
        let response = self.execute(request).await?;
        Ok(response.json()?)
    }

    async fn replay(&self, request: &ApiRequest) -> ApiResult<ApiResponse> {
        tracing::debug!(request_id = %request.id, path = %request.path, "replaying with renewed token");
        match self.transport.send(request).await {
            Err(error) if error.is_unauthorized() => {
                tracing::warn!(request_id = %request.id, path = %request.path, "rejected after renewal");
                Err(AuthError::Unauthorized.into())
            }
            other => other.map_err(ApiError::from),
        }
    }

    async fn token_for_replay(&self, request: &ApiRequest) -> Result<AccessToken, AuthError> {
        // With no wave open, a stored token other than the one sent was
        // produced by a wave that finished while this request was in flight.
        let admission = self.renewal.admit(&request.id, || {
            self.credentials
                .token()
                .filter(|current| request.bearer() != Some(current.expose()))
        });

        match admission {
            Admission::Replay(token) => Ok(token),
            Admission::Wait { receiver, opened } => {
                if opened {
                    self.spawn_renewal();
                }
                receiver.await.unwrap_or(Err(AuthError::RenewalInterrupted))
            }
        }
    }

    fn spawn_renewal(&self) {
        let transport = Arc::clone(&self.transport);
        let refresh_path = Arc::clone(&self.refresh_path);
        let closer = WaveCloser {
            renewal: Arc::clone(&self.renewal),
            credentials: Arc::clone(&self.credentials),
            settled: false,
        };

        tracing::info!("renewing access token");
        tokio::spawn(async move {
            let outcome = renew(transport.as_ref(), &refresh_path).await;
            closer.settle(outcome);
        });
    }
}

async fn renew<T: Transport>(transport: &T, refresh_path: &str) -> RenewalOutcome {
    let request = ApiRequest::post(refresh_path)
        .unauthenticated()
        .without_retry()
        .with_json(&serde_json::json!({}))
        .map_err(|e| AuthError::RenewalFailed(e.to_string()))?;

    let response = transport
        .send(&request)
        .await
        .map_err(|e| AuthError::RenewalFailed(e.to_string()))?;

    let body: RefreshResponse = response
        .json()
        .map_err(|e| AuthError::RenewalFailed(format!("malformed renewal response: {e}")))?;

    if body.access_token.expose().is_empty() {
        return Err(AuthError::RenewalFailed(
            "renewal response carried an empty token".to_string(),
        ));
    }
    Ok(body.access_token)
}

/// Ends the active wave; if dropped unsettled, waiters see an interruption.
struct WaveCloser {
    renewal: Arc<RenewalState>,
    credentials: Arc<dyn CredentialStore>,
    settled: bool,
}

impl WaveCloser {
    fn settle(mut self, outcome: RenewalOutcome) {
        self.settled = true;
        match &outcome {
            // Stored before the wave closes so a 401 arriving afterwards
            // sees the new token and replays without renewing.
            Ok(token) => self.credentials.set_token(token.clone()),
            Err(error) => {
                tracing::warn!(%error, "token renewal failed, invalidating session");
            }
        }

        let wave = self.renewal.finish();
        if outcome.is_err() {
            self.credentials.on_invalidate();
        }

        let waiters = wave.map_or(0, |wave| wave.settle(&outcome));
        if outcome.is_ok() {
            tracing::info!(waiters, "access token renewed");
        }
    }
}

impl Drop for WaveCloser {
    fn drop(&mut self) {
        if !self.settled
            && let Some(wave) = self.renewal.finish()
        {
            wave.settle(&Err(AuthError::RenewalInterrupted));
        }
    }
}
