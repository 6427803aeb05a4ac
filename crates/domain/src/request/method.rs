//! HTTP methods

use std::fmt;

use serde::{Deserialize, Serialize};

/// The methods the Baza backend routes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// Reads, including every cached listing
    Get,
    /// Sign-in, renewal, logout and top-up initiation
    Post,
    /// Profile updates
    Put,
    /// Partial updates
    Patch,
    /// Deletions
    Delete,
}

impl HttpMethod {
    /// Upper-case wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
