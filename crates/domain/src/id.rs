//! Request identifiers

use uuid::Uuid;

/// A fresh, time-ordered request id.
///
/// A replayed request keeps the id of the original, so both show up
/// together in the logs.
#[must_use]
pub fn new_request_id() -> String {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sortable_uuids() {
        let first = new_request_id();
        let second = new_request_id();
        assert!(Uuid::parse_str(&first).is_ok());
        assert_ne!(first, second);
        assert!(first < second);
    }
}
