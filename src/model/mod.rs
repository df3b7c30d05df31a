//! Pure data structures for the inventory domain.
//!
//! Models carry state and defaulting rules only; the
//! [`inventory`](crate::inventory) actor owns all behavior and side effects.

pub mod alert;
pub mod item;
pub mod stats;

pub use alert::{ExpiryAlert, Urgency};
pub use item::{
    Category, InventoryFilter, InventoryItem, ItemDraft, ItemId, ItemOutcome, ItemPatch,
    ItemStatus, StorageLocation,
};
pub use stats::{InventoryStats, WasteRollup};
