//! Checkout and order history

use baza_domain::{ApiRequest, NewOrder, OrderCreated, OrderDetail, OrderPage, OrderStatus};

use super::{WalletService, path_segment};
use crate::auth::AuthCoordinator;
use crate::cache::CacheLayer;
use crate::error::{ApiError, ApiResult};
use crate::ports::Transport;

const CREATE: &str = "/orders/create";
const LIST: &str = "/orders/";

/// Order endpoints. Orders are paid from the wallet, so placing one
/// drops the cached balance and account.
pub struct OrderService<T: Transport> {
    api: AuthCoordinator<T>,
    cache: CacheLayer,
}

impl<T: Transport> Clone for OrderService<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            cache: self.cache.clone(),
        }
    }
}

impl<T: Transport + 'static> OrderService<T> {
    /// Creates the service.
    pub const fn new(api: AuthCoordinator<T>, cache: CacheLayer) -> Self {
        Self { api, cache }
    }

    /// Places an order and debits the wallet.
    ///
    /// The cached balance is dropped on success, and also on a transport
    /// failure since the debit may have gone through.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is rejected (e.g. insufficient funds)
    /// or the response cannot be decoded.
    pub async fn create(&self, order: &NewOrder) -> ApiResult<OrderCreated> {
        let request = ApiRequest::post(CREATE).with_json(order)?;
        let result: ApiResult<OrderCreated> = self.api.execute_json(request).await;

        match &result {
            Ok(created) => {
                self.invalidate_wallet();
                tracing::info!(
                    order_id = %created.order.id,
                    total = order.total,
                    wallet_balance = created.wallet_balance,
                    "order placed"
                );
            }
            Err(ApiError::Transport(e)) => {
                self.invalidate_wallet();
                tracing::warn!(error = %e, "order outcome unknown");
            }
            Err(_) => {}
        }
        result
    }

    /// One page of the order history, newest first. Not cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be fetched or decoded.
    pub async fn list(
        &self,
        page: u32,
        limit: u32,
        status: Option<OrderStatus>,
    ) -> ApiResult<OrderPage> {
        let request = ApiRequest::get(LIST)
            .with_query("page", page)
            .with_query("limit", limit)
            .with_optional_query("status", status.map(OrderStatus::as_str));
        self.api.execute_json(request).await
    }

    /// One order with its priced lines.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Request` for an id that is not a single path
    /// segment, or an error if the order cannot be fetched or decoded.
    pub async fn get(&self, id: &str) -> ApiResult<OrderDetail> {
        let path = format!("/orders/{}", path_segment(id)?);
        let mut body: serde_json::Value = self.api.execute_json(ApiRequest::get(path)).await?;

        // Accepts both `{"order": {...}}` and a bare order.
        let detail = match body.get_mut("order") {
            Some(order) => order.take(),
            None => body,
        };
        Ok(serde_json::from_value(detail)?)
    }

    fn invalidate_wallet(&self) {
        self.cache.invalidate(&WalletService::<T>::balance_key());
        self.cache.invalidate(&WalletService::<T>::account_key());
    }
}
