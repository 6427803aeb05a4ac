//! Request specification for a single backend call

use serde::{Deserialize, Serialize};

use super::HttpMethod;
use crate::error::{DomainError, DomainResult};
use crate::id::new_request_id;
use crate::token::AccessToken;

/// Name of the header carrying the bearer credential.
pub const AUTHORIZATION: &str = "Authorization";

/// A single call to the Baza backend.
///
/// Paths are relative to the configured API base URL. The `retried` flag
/// records whether the request has already been replayed once after an
/// authorization failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRequest {
    /// Correlation id, stable across a replay.
    pub id: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Path relative to the API base URL, starting with `/`.
    pub path: String,
    /// Query parameters in insertion order.
    #[serde(default)]
    pub query: Vec<(String, String)>,
    /// Extra headers in insertion order.
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    /// JSON body, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
    /// Whether the current bearer token should be attached.
    pub authenticated: bool,
    /// Whether this request was already replayed after a 401.
    pub retried: bool,
}

impl ApiRequest {
    /// Creates an authenticated request with no query, headers or body.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            id: new_request_id(),
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            authenticated: true,
            retried: false,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Creates a PUT request.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// Creates a PATCH request.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Adds a query parameter. Empty values are skipped.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        let value = value.to_string();
        if !value.is_empty() {
            self.query.push((name.into(), value));
        }
        self
    }

    /// Adds an optional query parameter.
    #[must_use]
    pub fn with_optional_query(self, name: impl Into<String>, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.with_query(name, value),
            None => self,
        }
    }

    /// Serializes `body` as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBody` if the value cannot be serialized.
    pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> DomainResult<Self> {
        let value =
            serde_json::to_value(body).map_err(|e| DomainError::InvalidBody(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Sets a header, replacing any existing header with the same name.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Marks the request as not requiring a bearer token.
    #[must_use]
    pub const fn unauthenticated(mut self) -> Self {
        self.authenticated = false;
        self
    }

    /// Marks the request as already retried so an authorization failure
    /// is surfaced instead of starting a token renewal.
    #[must_use]
    pub const fn without_retry(mut self) -> Self {
        self.retried = true;
        self
    }

    /// Sets a header in place (case-insensitive replace).
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
    }

    /// Returns a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Attaches `token` as the bearer credential.
    pub fn set_bearer(&mut self, token: &AccessToken) {
        self.set_header(AUTHORIZATION, token.authorization_header());
    }

    /// Removes any bearer credential.
    pub fn clear_bearer(&mut self) {
        self.headers
            .retain(|(n, _)| !n.eq_ignore_ascii_case(AUTHORIZATION));
    }

    /// Returns the bearer token currently attached, if any.
    #[must_use]
    pub fn bearer(&self) -> Option<&str> {
        self.header(AUTHORIZATION)
            .and_then(|value| value.strip_prefix("Bearer "))
    }

    /// Checks that the path is relative to the API base.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPath` if the path does not start with `/`.
    pub fn validate(&self) -> DomainResult<()> {
        if self.path.starts_with('/') {
            Ok(())
        } else {
            Err(DomainError::InvalidPath(self.path.clone()))
        }
    }
}
