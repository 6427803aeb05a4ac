//! Transport implementation using reqwest.
//!
//! This adapter implements the `Transport` port for the Baza backend. Paths
//! are resolved against the configured API base URL, every request gets the
//! configured timeout, and a shared cookie store carries the long-lived
//! session that the renewal endpoint authenticates with.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use baza_application::{Transport, TransportError};
use baza_domain::{ApiRequest, ApiResponse, HttpMethod, Settings, StatusCode};
use reqwest::header::{ACCEPT, HeaderMap};
use reqwest::{Client, Method, Url};

/// HTTP transport backed by a `reqwest::Client` with a cookie store.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Creates a transport from settings.
    ///
    /// Configuration:
    /// - Base URL and timeout from `settings`
    /// - Cookie store: enabled, shared by every request
    /// - Follow redirects: up to 10
    /// - User-Agent: `settings.user_agent`
    ///
    /// # Errors
    ///
    /// Returns `TransportError::InvalidRequest` if the settings are invalid,
    /// or `TransportError::Other` if the client cannot be built.
    pub fn new(settings: &Settings) -> Result<Self, TransportError> {
        settings
            .validate()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        let base_url = settings
            .base_url()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            timeout: settings.timeout(),
        })
    }

    /// The base URL paths are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a request path against the base URL, keeping any base path
    /// such as `/v1`.
    fn resolve(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| TransportError::InvalidRequest(format!("{e}: {path}")))
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Maps reqwest errors to `TransportError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout { timeout_ms };
        }

        if error.is_connect() {
            let host = error
                .url()
                .and_then(Url::host_str)
                .unwrap_or("unknown")
                .to_string();
            return TransportError::Connection(format!("{host}: {error}"));
        }

        if error.is_builder() {
            return TransportError::InvalidRequest(error.to_string());
        }

        TransportError::Other(error.to_string())
    }

    fn collect_headers(headers: &HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect()
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.resolve(&request.path)?;
        let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);

        let start = Instant::now();

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url)
            .timeout(self.timeout)
            .header(ACCEPT, "application/json");

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;

        let status = StatusCode::new(response.status().as_u16());
        let headers = Self::collect_headers(response.headers());
        let body = response
            .bytes()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?
            .to_vec();
        let duration = start.elapsed();

        tracing::debug!(
            request_id = %request.id,
            method = %request.method,
            path = %request.path,
            status = status.as_u16(),
            elapsed_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            "response received"
        );

        if !status.is_success() {
            return Err(TransportError::Status { status, body });
        }
        Ok(ApiResponse::new(status, headers, body, duration))
    }
}
