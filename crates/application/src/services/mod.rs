//! Resource services built on the coordinator and the cache.
//!
//! Each service maps one backend area onto typed calls. Read-mostly
//! resources go through the cache; writes and paged listings do not.

mod auth;
mod catalog;
mod orders;
mod referral;
mod support;
mod user;
mod wallet;

pub use auth::AuthService;
pub use catalog::{CatalogService, PrefetchReport};
pub use orders::OrderService;
pub use referral::ReferralService;
pub use support::SupportService;
pub use user::UserService;
pub use wallet::WalletService;

use baza_domain::{ApiResponse, DomainError};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, ApiResult};

/// Decodes one field of an enveloped JSON body, e.g. `{"bundles": [...]}`.
pub(crate) fn envelope_field<T: DeserializeOwned>(
    response: &ApiResponse,
    field: &str,
) -> ApiResult<T> {
    let mut body: serde_json::Value = response.json()?;
    let value = body
        .get_mut(field)
        .map(serde_json::Value::take)
        .ok_or_else(|| ApiError::Decode(format!("response has no `{field}` field")))?;
    Ok(serde_json::from_value(value)?)
}

/// Checks that a server id can be spliced into a path as one segment.
pub(crate) fn path_segment(id: &str) -> ApiResult<&str> {
    if id.is_empty() || id.contains(['/', '?', '#', '%']) || id.contains(char::is_whitespace) {
        return Err(DomainError::InvalidPath(id.to_string()).into());
    }
    Ok(id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_envelope_field() {
        let response = ApiResponse::json_body(200, &json!({ "items": [1, 2, 3] }));
        let items: Vec<u32> = envelope_field(&response, "items").unwrap();
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_envelope_field() {
        let response = ApiResponse::json_body(200, &json!({ "other": [] }));
        let error = envelope_field::<Vec<u32>>(&response, "items").unwrap_err();
        assert_eq!(
            error,
            ApiError::Decode("response has no `items` field".to_string())
        );
    }

    #[test]
    fn test_mismatched_envelope_field() {
        let response = ApiResponse::json_body(200, &json!({ "items": "nope" }));
        assert!(matches!(
            envelope_field::<Vec<u32>>(&response, "items"),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_path_segment() {
        assert_eq!(path_segment("ord_01HZ").unwrap(), "ord_01HZ");
        for bad in ["", "a/b", "a?b=1", "a#b", "a b", "..%2F"] {
            assert_eq!(
                path_segment(bad).unwrap_err(),
                ApiError::Request(DomainError::InvalidPath(bad.to_string()))
            );
        }
    }
}
