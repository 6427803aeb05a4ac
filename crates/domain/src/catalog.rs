//! Catalog payloads
//!
//! Listings served by the `/products/*` endpoints. Prices are whole naira.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

/// One line of a stock-up bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleItem {
    pub id: String,
    pub product_id: String,
    pub name: String,
    pub emoji: String,
    pub unit_price: u64,
    pub default_qty: u32,
    pub min_qty: u32,
    pub max_qty: u32,
}

/// Pre-built stock-up bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub description: String,
    pub base_price: u64,
    pub savings: u64,
    pub color: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub items: Vec<BundleItem>,
}

/// Ingredient of a meal pack, quantified per plate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealIngredient {
    pub name: String,
    pub emoji: String,
    pub unit: String,
    pub per_plate: f64,
    pub price_per_plate: u64,
}

/// "Cook a meal" pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPack {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub description: String,
    pub base_time: u32,
    pub base_plates: u32,
    pub base_price: u64,
    pub color: String,
    #[serde(default)]
    pub ingredients: Vec<MealIngredient>,
}

/// Hot food from a partner kitchen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyEatItem {
    pub id: String,
    pub name: String,
    pub kitchen: String,
    pub emoji: String,
    pub price: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<u64>,
    pub delivery_time: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub description: String,
    pub color: String,
}

/// Snack or drink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnackItem {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub price: u64,
    pub category: String,
    #[serde(default)]
    pub tag: String,
    pub color: String,
}

/// Pantry staple for "shop your list".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockItem {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub emoji: String,
    pub price: u64,
    pub category: String,
}

/// Restock search result with the categories available for filtering.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockListing {
    #[serde(default)]
    pub items: Vec<RestockItem>,
    #[serde(default)]
    pub categories: Vec<String>,
}
