//! Fakes shared by the unit tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Duration;

use baza_domain::{ApiRequest, ApiResponse, StatusCode};
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use serde_json::{Value, json};

use crate::error::TransportError;
use crate::ports::{Clock, Transport};

pub const REFRESH_PATH: &str = "/auth/refresh";

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += chrono::TimeDelta::from_std(by).unwrap();
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

#[derive(Default)]
struct BackendState {
    accepted_token: Option<String>,
    renewals: VecDeque<Result<String, u16>>,
    routes: HashMap<String, (u16, Value)>,
    always_unauthorized: HashSet<String>,
    latencies: HashMap<String, Duration>,
    log: Vec<ApiRequest>,
}

/// In-memory backend with a fixed latency per call.
///
/// Authenticated calls succeed only with the accepted token. Each call to
/// the renewal endpoint consumes the next scripted renewal outcome; with
/// none left it answers 401.
pub struct FakeBackend {
    state: Mutex<BackendState>,
    latency: Duration,
}

impl FakeBackend {
    pub fn new(latency: Duration) -> Self {
        Self {
            state: Mutex::new(BackendState::default()),
            latency,
        }
    }

    pub fn accepting(self, token: &str) -> Self {
        self.state.lock().accepted_token = Some(token.to_string());
        self
    }

    pub fn route(self, path: &str, body: Value) -> Self {
        self.route_status(path, 200, body)
    }

    pub fn route_status(self, path: &str, status: u16, body: Value) -> Self {
        self.state
            .lock()
            .routes
            .insert(path.to_string(), (status, body));
        self
    }

    pub fn renews_to(self, token: &str) -> Self {
        self.state
            .lock()
            .renewals
            .push_back(Ok(token.to_string()));
        self
    }

    pub fn renewal_fails(self, status: u16) -> Self {
        self.state.lock().renewals.push_back(Err(status));
        self
    }

    pub fn always_unauthorized(self, path: &str) -> Self {
        self.state
            .lock()
            .always_unauthorized
            .insert(path.to_string());
        self
    }

    /// Overrides the latency of one path.
    pub fn latency_for(self, path: &str, latency: Duration) -> Self {
        self.state
            .lock()
            .latencies
            .insert(path.to_string(), latency);
        self
    }

    pub fn calls(&self, path: &str) -> usize {
        self.state
            .lock()
            .log
            .iter()
            .filter(|r| r.path == path)
            .count()
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().log.clone()
    }

    fn respond(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut state = self.state.lock();
        if request.path == REFRESH_PATH {
            return match state.renewals.pop_front() {
                Some(Ok(token)) => {
                    state.accepted_token = Some(token.clone());
                    Ok(ApiResponse::json_body(200, &json!({ "accessToken": token })))
                }
                Some(Err(status)) => Err(status_error(status, "Refresh failed")),
                None => Err(status_error(401, "No session")),
            };
        }

        if request.authenticated
            && (state.always_unauthorized.contains(&request.path)
                || state.accepted_token.as_deref() != request.bearer()
                || request.bearer().is_none())
        {
            return Err(status_error(401, "Unauthorized"));
        }

        match state.routes.get(&request.path) {
            Some((status, body)) if (200..300).contains(status) => {
                Ok(ApiResponse::json_body(*status, body))
            }
            Some((status, body)) => Err(TransportError::Status {
                status: StatusCode::new(*status),
                body: body.to_string().into_bytes(),
            }),
            None => Err(status_error(404, "Not found")),
        }
    }
}

impl Transport for FakeBackend {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let latency = {
            let mut state = self.state.lock();
            state.log.push(request.clone());
            state
                .latencies
                .get(&request.path)
                .copied()
                .unwrap_or(self.latency)
        };
        tokio::time::sleep(latency).await;
        self.respond(request)
    }
}

/// Transport answering through a closure, for one-off scripts.
pub struct FnTransport<F>(pub F);

impl<F> Transport for FnTransport<F>
where
    F: Fn(&ApiRequest) -> Result<ApiResponse, TransportError> + Send + Sync,
{
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        (self.0)(request)
    }
}

pub fn status_error(status: u16, message: &str) -> TransportError {
    TransportError::Status {
        status: StatusCode::new(status),
        body: json!({ "error": message, "code": "TEST" })
            .to_string()
            .into_bytes(),
    }
}
