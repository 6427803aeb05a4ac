//! Order payloads

use serde::{Deserialize, Serialize};

use crate::wallet::Pagination;

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Placed, awaiting confirmation.
    Pending,
    /// Accepted by the store.
    Confirmed,
    /// Being packed.
    Preparing,
    /// With the rider.
    Dispatched,
    /// Handed over.
    Delivered,
    /// Cancelled and refunded.
    Cancelled,
}

impl OrderStatus {
    /// Wire name, as used in the `status` list filter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Preparing => "PREPARING",
            Self::Dispatched => "DISPATCHED",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Returns true once the order can no longer change.
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

/// Line shown in order lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemSummary {
    /// Display name.
    pub name: String,
    /// Emoji shown next to the name.
    pub emoji: String,
    /// Quantity.
    pub qty: u32,
}

/// Priced line of an order detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Server id.
    pub id: String,
    /// Product family, e.g. `BUNDLE` or `SNACK`.
    pub item_type: String,
    /// Display name.
    pub name: String,
    /// Emoji shown next to the name.
    pub emoji: String,
    /// Quantity.
    pub qty: u32,
    /// Price of one unit.
    pub unit_price: i64,
    /// Price of the line.
    pub total_price: i64,
    /// Customisation chosen at checkout, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

/// Order as listed in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Server id.
    pub id: String,
    /// Current state.
    pub status: OrderStatus,
    /// Order total.
    pub total: i64,
    /// Note for the rider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Delivery estimate, free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta: Option<String>,
    /// Ordered lines.
    #[serde(default)]
    pub items: Vec<OrderItemSummary>,
    /// ISO-8601 creation time.
    pub created_at: String,
}

/// Full order with priced lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    /// Server id.
    pub id: String,
    /// Current state.
    pub status: OrderStatus,
    /// Order total.
    pub total: i64,
    /// Note for the rider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Delivery estimate, free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta: Option<String>,
    /// Ordered lines.
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Delivery address id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_id: Option<String>,
    /// ISO-8601 creation time.
    pub created_at: String,
}

/// Line submitted when placing an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    /// Product family, e.g. `BUNDLE` or `SNACK`.
    pub item_type: String,
    /// Catalog product id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    /// Display name.
    pub name: String,
    /// Emoji shown next to the name.
    pub emoji: String,
    /// Quantity.
    pub qty: u32,
    /// Price of one unit.
    pub unit_price: i64,
    /// Price of the line.
    pub total_price: i64,
    /// Customisation chosen in the cart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

/// Checkout payload. The order is paid from the wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// Ordered lines.
    pub items: Vec<NewOrderItem>,
    /// Order total.
    pub total: i64,
    /// Note for the rider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Delivery address; the default address when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_id: Option<String>,
}

impl NewOrder {
    /// Builds a payload delivered to the default address. `total` is the
    /// amount the cart computed; the server checks it against the lines.
    #[must_use]
    pub const fn new(items: Vec<NewOrderItem>, total: i64) -> Self {
        Self {
            items,
            total,
            note: None,
            address_id: None,
        }
    }
}

/// Response of a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreated {
    /// The placed order.
    pub order: OrderDetail,
    /// Balance after the wallet debit.
    pub wallet_balance: i64,
}

/// One page of the order history.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPage {
    /// Orders on this page.
    #[serde(default)]
    pub orders: Vec<Order>,
    /// Pagination, when the server includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}
