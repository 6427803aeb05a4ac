//! Profile and delivery address payloads

use serde::{Deserialize, Serialize};

/// Saved delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Server id.
    pub id: String,
    /// Short name, e.g. "Home".
    pub label: String,
    /// Street address.
    pub address: String,
    /// Nearby landmark for the rider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    /// Whether deliveries go here by default.
    #[serde(default)]
    pub is_default: bool,
}

/// Address to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAddress {
    /// Short name, e.g. "Home".
    pub label: String,
    /// Street address.
    pub address: String,
    /// Nearby landmark for the rider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
}

impl NewAddress {
    /// Creates an address without a landmark.
    #[must_use]
    pub fn new(label: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            address: address.into(),
            landmark: None,
        }
    }
}

/// Partial address update. Absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressUpdate {
    /// Short name, e.g. "Home".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Street address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Nearby landmark for the rider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
}

/// Partial profile update. Absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Plain `{"message": ...}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Acknowledgement {
    /// Server message.
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_partial_updates_omit_absent_fields() {
        let update = ProfileUpdate {
            email: Some("ada@example.com".to_string()),
            ..ProfileUpdate::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "email": "ada@example.com" })
        );
        assert_eq!(
            serde_json::to_value(AddressUpdate::default()).unwrap(),
            json!({})
        );
    }

    #[test]
    fn test_address_defaults() {
        let address: Address = serde_json::from_value(json!({
            "id": "a1", "label": "Home", "address": "12 Admiralty Way, Lekki"
        }))
        .unwrap();
        assert!(!address.is_default);
        assert_eq!(address.landmark, None);
    }
}
