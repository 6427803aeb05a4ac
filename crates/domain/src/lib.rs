//! Baza Domain - Core types for the network-access layer
//!
//! This crate defines the value types shared by every layer of the
//! Baza client: API requests and responses, access tokens, cache keys,
//! client settings and the JSON payloads of the catalog, wallet,
//! account, order, profile, referral and support endpoints.
//! All types here are pure Rust with no I/O dependencies.

pub mod account;
pub mod cache_key;
pub mod catalog;
pub mod error;
pub mod id;
pub mod order;
pub mod profile;
pub mod referral;
pub mod request;
pub mod response;
pub mod settings;
pub mod support;
pub mod token;
pub mod wallet;

pub use account::{
    AuthResponse, NotificationPreferences, OtpChallenge, OtpVerification, RefreshResponse, User,
};
pub use cache_key::CacheKey;
pub use catalog::{
    Bundle, BundleItem, MealIngredient, MealPack, ReadyEatItem, RestockItem, RestockListing,
    SnackItem,
};
pub use error::{DomainError, DomainResult};
pub use id::new_request_id;
pub use order::{
    NewOrder, NewOrderItem, Order, OrderCreated, OrderDetail, OrderItem, OrderItemSummary,
    OrderPage, OrderStatus,
};
pub use profile::{Acknowledgement, Address, AddressUpdate, NewAddress, ProfileUpdate};
pub use referral::{Referral, ReferralStats};
pub use request::{ApiRequest, HttpMethod};
pub use response::{ApiErrorBody, ApiResponse, StatusCode};
pub use settings::{Settings, TtlSettings};
pub use support::{MessageExchange, MessageSender, SupportMessage, SupportThread};
pub use token::AccessToken;
pub use wallet::{
    Pagination, PaystackConfig, TopupInitiation, TopupVerification, TransactionPage,
    WalletAccount, WalletBalance, WalletTransaction, WalletTxnType,
};
