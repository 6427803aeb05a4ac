//! Response received from the backend

use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::StatusCode;

/// Error payload returned by the backend on non-success statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Human readable message.
    pub error: String,
    /// Machine readable code, e.g. `INSUFFICIENT_FUNDS`.
    #[serde(default)]
    pub code: String,
}

impl ApiErrorBody {
    /// Parses an error body, returning `None` when it is not the `{error, code}` shape.
    #[must_use]
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }
}

/// A completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers, lower-cased names.
    pub headers: HashMap<String, String>,
    /// Raw response body.
    pub body: Vec<u8>,
    /// Time spent on the wire.
    pub duration: Duration,
}

impl ApiResponse {
    /// Creates a new response.
    #[must_use]
    pub fn new(
        status: impl Into<StatusCode>,
        headers: HashMap<String, String>,
        body: Vec<u8>,
        duration: Duration,
    ) -> Self {
        Self {
            status: status.into(),
            headers,
            body,
            duration,
        }
    }

    /// Creates a response carrying a JSON body, with no headers.
    #[must_use]
    pub fn json_body(status: impl Into<StatusCode>, body: &serde_json::Value) -> Self {
        Self::new(
            status,
            HashMap::new(),
            body.to_string().into_bytes(),
            Duration::ZERO,
        )
    }

    /// Deserializes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the serde error when the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// The `{error, code}` payload, if the body has that shape.
    #[must_use]
    pub fn error_body(&self) -> Option<ApiErrorBody> {
        ApiErrorBody::parse(&self.body)
    }
}
