//! Core data types for tracked food items.
//!
//! These are pure data structures. All behavior (classification, persistence,
//! notification side effects) lives in the [`inventory`](crate::inventory)
//! actor module; the types here only carry state and defaulting rules.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

/// Type-safe identifier for inventory items.
///
/// Backed by a UUID v7, so ids are time-ordered with a random suffix.
/// Uniqueness is best-effort in the same sense as any UUID: collisions are
/// negligible but not cryptographically ruled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed set of food categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Fruits,
    Vegetables,
    Dairy,
    Meat,
    Bakery,
    Frozen,
    Pantry,
    Snacks,
    Beverages,
    Other,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Fruits,
        Category::Vegetables,
        Category::Dairy,
        Category::Meat,
        Category::Bakery,
        Category::Frozen,
        Category::Pantry,
        Category::Snacks,
        Category::Beverages,
        Category::Other,
    ];

    /// Where an item of this category is stored when the caller does not say.
    pub fn default_location(self) -> StorageLocation {
        match self {
            Category::Dairy | Category::Meat | Category::Fruits | Category::Vegetables => {
                StorageLocation::Fridge
            }
            Category::Frozen => StorageLocation::Freezer,
            Category::Bakery => StorageLocation::Counter,
            _ => StorageLocation::Pantry,
        }
    }

    /// Approximate kilograms of CO2 avoided by consuming one item of this
    /// category instead of wasting it. Flat per-category estimates.
    pub fn co2_estimate_kg(self) -> f64 {
        match self {
            Category::Meat => 15.0,
            Category::Dairy => 3.0,
            Category::Frozen => 1.5,
            Category::Snacks => 1.2,
            Category::Bakery => 1.0,
            Category::Other => 1.0,
            Category::Pantry => 0.8,
            Category::Beverages => 0.7,
            Category::Fruits => 0.5,
            Category::Vegetables => 0.3,
        }
    }
}

/// Where the item physically lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageLocation {
    Fridge,
    Freezer,
    Pantry,
    Counter,
}

/// Lifecycle tag of an item.
///
/// `Fresh`, `Nearing` and `Expired` are assigned automatically from the
/// expiry date. `Used`, `Donated` and `Sold` are terminal: once an item
/// carries one of them it is permanently exempt from reclassification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Fresh,
    Nearing,
    Expired,
    Used,
    Donated,
    Sold,
}

impl ItemStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, ItemStatus::Used | ItemStatus::Donated | ItemStatus::Sold)
    }
}

/// How an item left the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    Used,
    Donated,
    Sold,
}

impl ItemOutcome {
    pub fn status(self) -> ItemStatus {
        match self {
            ItemOutcome::Used => ItemStatus::Used,
            ItemOutcome::Donated => ItemStatus::Donated,
            ItemOutcome::Sold => ItemStatus::Sold,
        }
    }
}

/// A tracked food item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    /// Name as it appeared on the scanned receipt, before cleanup.
    pub original_name: Option<String>,
    pub category: Category,
    pub quantity: f64,
    pub unit: String,
    pub price: f64,
    pub expires_on: NaiveDate,
    pub location: StorageLocation,
    pub notes: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub shared_in_marketplace: bool,
    /// Identifiers of reminders scheduled with the notification dispatcher,
    /// cancelled when the item is resolved or removed.
    #[serde(default)]
    pub notification_ids: Vec<String>,
    pub status: ItemStatus,
    pub added_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub consumed_at: Option<DateTime<Utc>>,
}

/// Payload for creating an item.
#[derive(Debug, Clone)]
pub struct ItemDraft {
    pub name: String,
    pub original_name: Option<String>,
    pub category: Category,
    /// Defaults to 1.
    pub quantity: Option<f64>,
    /// Defaults to "pieces".
    pub unit: Option<String>,
    /// Defaults per [`Category::default_location`].
    pub location: Option<StorageLocation>,
    pub expires_on: NaiveDate,
    /// Defaults to 0.
    pub price: Option<f64>,
    pub notes: Option<String>,
}

impl ItemDraft {
    pub fn new(name: impl Into<String>, category: Category, expires_on: NaiveDate) -> Self {
        Self {
            name: name.into(),
            original_name: None,
            category,
            quantity: None,
            unit: None,
            location: None,
            expires_on,
            price: None,
            notes: None,
        }
    }
}

/// Partial update for an item. Only the fields that are `Some` are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    pub name: Option<String>,
    pub original_name: Option<String>,
    pub category: Option<Category>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub price: Option<f64>,
    pub expires_on: Option<NaiveDate>,
    pub location: Option<StorageLocation>,
    pub notes: Option<String>,
    pub photos: Option<Vec<String>>,
    pub status: Option<ItemStatus>,
}

/// Narrowing criteria for inventory listings. Empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct InventoryFilter {
    pub statuses: Option<Vec<ItemStatus>>,
    pub categories: Option<Vec<Category>>,
    pub locations: Option<Vec<StorageLocation>>,
    /// Case-insensitive substring match against name or original name.
    pub search: Option<String>,
}

impl InventoryFilter {
    pub fn matches(&self, item: &InventoryItem) -> bool {
        if let Some(statuses) = &self.statuses {
            if !statuses.contains(&item.status) {
                return false;
            }
        }
        if let Some(categories) = &self.categories {
            if !categories.contains(&item.category) {
                return false;
            }
        }
        if let Some(locations) = &self.locations {
            if !locations.contains(&item.location) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let in_name = item.name.to_lowercase().contains(&needle);
            let in_original = item
                .original_name
                .as_ref()
                .is_some_and(|n| n.to_lowercase().contains(&needle));
            if !in_name && !in_original {
                return false;
            }
        }
        true
    }
}
