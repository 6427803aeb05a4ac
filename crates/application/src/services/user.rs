//! Profile, notification preferences and delivery addresses

use baza_domain::{
    Acknowledgement, Address, AddressUpdate, ApiRequest, NewAddress, NotificationPreferences,
    ProfileUpdate, User,
};

use super::{envelope_field, path_segment};
use crate::auth::AuthCoordinator;
use crate::error::ApiResult;
use crate::ports::Transport;

const PROFILE: &str = "/user/profile";
const NOTIFICATIONS: &str = "/user/notifications";
const ADDRESSES: &str = "/user/addresses/";
const CREATE_ADDRESS: &str = "/user/addresses/create";

/// Account profile endpoints. None of them are cached.
pub struct UserService<T: Transport> {
    api: AuthCoordinator<T>,
}

impl<T: Transport> Clone for UserService<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

impl<T: Transport + 'static> UserService<T> {
    /// Creates the service.
    pub const fn new(api: AuthCoordinator<T>) -> Self {
        Self { api }
    }

    /// Updates name and/or email.
    ///
    /// # Errors
    ///
    /// Returns an error if the update is rejected or the profile cannot
    /// be decoded.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<User> {
        let user: User = self
            .api
            .execute_json(ApiRequest::put(PROFILE).with_json(update)?)
            .await?;
        tracing::info!(user_id = %user.id, "profile updated");
        Ok(user)
    }

    /// Replaces the notification preferences and returns the stored ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the update is rejected or the response has no
    /// `notifications` field.
    pub async fn update_notifications(
        &self,
        preferences: NotificationPreferences,
    ) -> ApiResult<NotificationPreferences> {
        let request = ApiRequest::put(NOTIFICATIONS).with_json(&preferences)?;
        let response = self.api.execute(request).await?;
        envelope_field(&response, "notifications")
    }

    /// Saved delivery addresses.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be fetched or decoded.
    pub async fn addresses(&self) -> ApiResult<Vec<Address>> {
        let response = self.api.execute(ApiRequest::get(ADDRESSES)).await?;
        envelope_field(&response, "addresses")
    }

    /// Saves a new address.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is rejected or cannot be decoded.
    pub async fn create_address(&self, address: &NewAddress) -> ApiResult<Address> {
        self.api
            .execute_json(ApiRequest::post(CREATE_ADDRESS).with_json(address)?)
            .await
    }

    /// Edits an address.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Request` for an id that is not a single path
    /// segment, or an error if the update is rejected.
    pub async fn update_address(&self, id: &str, update: &AddressUpdate) -> ApiResult<Address> {
        let path = format!("/user/addresses/{}", path_segment(id)?);
        self.api
            .execute_json(ApiRequest::put(path).with_json(update)?)
            .await
    }

    /// Makes an address the default delivery address.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Request` for an id that is not a single path
    /// segment, or an error if the server refuses.
    pub async fn set_default_address(&self, id: &str) -> ApiResult<Acknowledgement> {
        let path = format!("/user/addresses/{}/default", path_segment(id)?);
        self.api.execute_json(ApiRequest::patch(path)).await
    }

    /// Deletes an address.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Request` for an id that is not a single path
    /// segment, or an error if the server refuses.
    pub async fn delete_address(&self, id: &str) -> ApiResult<Acknowledgement> {
        let path = format!("/user/addresses/{}/delete", path_segment(id)?);
        let ack: Acknowledgement = self.api.execute_json(ApiRequest::delete(path)).await?;
        tracing::debug!(address_id = id, "address deleted");
        Ok(ack)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use baza_domain::{DomainError, HttpMethod};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::auth::TokenStore;
    use crate::error::ApiError;
    use crate::test_support::{FakeBackend, REFRESH_PATH};

    const LATENCY: Duration = Duration::from_millis(20);

    fn service(backend: FakeBackend) -> (UserService<FakeBackend>, Arc<FakeBackend>) {
        let backend = Arc::new(backend.accepting("t1"));
        let api = AuthCoordinator::new(
            Arc::clone(&backend),
            Arc::new(TokenStore::with_token("t1")),
            REFRESH_PATH,
        );
        (UserService::new(api), backend)
    }

    fn home() -> serde_json::Value {
        json!({ "id": "a1", "label": "Home", "address": "12 Admiralty Way, Lekki", "isDefault": true })
    }

    #[tokio::test(start_paused = true)]
    async fn test_addresses_are_unwrapped() {
        let (user, _) = service(
            FakeBackend::new(LATENCY).route(ADDRESSES, json!({ "addresses": [home()] })),
        );

        let addresses = user.addresses().await.unwrap();

        assert_eq!(addresses.len(), 1);
        assert!(addresses[0].is_default);
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_profile_sends_only_set_fields() {
        let (user, backend) = service(FakeBackend::new(LATENCY).route(
            PROFILE,
            json!({
                "id": "u1", "name": "Ada O.", "phone": "+2348012345678",
                "memberSince": "2026-01-01T00:00:00Z"
            }),
        ));

        let updated = user
            .update_profile(&ProfileUpdate {
                name: Some("Ada O.".to_string()),
                ..ProfileUpdate::default()
            })
            .await
            .unwrap();

        assert_eq!(updated.name, "Ada O.");
        let request = &backend.requests()[0];
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.body, Some(json!({ "name": "Ada O." })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_notifications_returns_stored_preferences() {
        let stored = json!({
            "orders": true, "delivery": true, "deals": false, "reminders": false, "newsletter": false
        });
        let (user, _) = service(
            FakeBackend::new(LATENCY).route(NOTIFICATIONS, json!({ "notifications": stored })),
        );

        let preferences = user
            .update_notifications(NotificationPreferences {
                orders: true,
                delivery: true,
                ..NotificationPreferences::default()
            })
            .await
            .unwrap();

        assert!(preferences.delivery);
        assert!(!preferences.deals);
    }

    #[tokio::test(start_paused = true)]
    async fn test_address_mutations_use_their_methods() {
        let ack = json!({ "message": "ok" });
        let (user, backend) = service(
            FakeBackend::new(LATENCY)
                .route(CREATE_ADDRESS, home())
                .route("/user/addresses/a1", home())
                .route("/user/addresses/a1/default", ack.clone())
                .route("/user/addresses/a1/delete", ack),
        );

        user.create_address(&NewAddress::new("Home", "12 Admiralty Way, Lekki"))
            .await
            .unwrap();
        user.update_address(
            "a1",
            &AddressUpdate {
                landmark: Some("Opposite the filling station".to_string()),
                ..AddressUpdate::default()
            },
        )
        .await
        .unwrap();
        user.set_default_address("a1").await.unwrap();
        let deleted = user.delete_address("a1").await.unwrap();

        assert_eq!(deleted.message, "ok");
        let methods: Vec<HttpMethod> = backend.requests().iter().map(|r| r.method).collect();
        assert_eq!(
            methods,
            vec![
                HttpMethod::Post,
                HttpMethod::Put,
                HttpMethod::Patch,
                HttpMethod::Delete
            ]
        );
        assert_eq!(
            backend.requests()[1].body,
            Some(json!({ "landmark": "Opposite the filling station" }))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_address_id_is_rejected() {
        let (user, backend) = service(FakeBackend::new(LATENCY));

        let error = user.delete_address("").await.unwrap_err();

        assert_eq!(
            error,
            ApiError::Request(DomainError::InvalidPath(String::new()))
        );
        assert!(backend.requests().is_empty());
    }
}
