//! # ShelfLife Inventory
//!
//! Local grocery-inventory tracker: a single-owner registry of food items
//! with expiry classification, alerting, waste-prevention accounting, and
//! key-value persistence.
//!
//! ## Architecture
//!
//! The tracker is built as an **actor**. One task owns the authoritative
//! in-memory collection and processes every request sequentially, so there is
//! no lock around the state and user mutations can never interleave with the
//! recurring reclassification pass.
//!
//! - **[model]**: Pure data structures: [`InventoryItem`], [`ExpiryAlert`],
//!   [`InventoryStats`] and friends.
//! - **[inventory]**: The actor itself plus the pure classification rules
//!   (ceiling day arithmetic, status thresholds, the alert table, the monthly
//!   waste rollup).
//! - **[clients]**: [`InventoryClient`], the cloneable typed handle that is
//!   the crate's public API surface.
//! - **[storage]** / **[notify]**: Collaborator seams, injected at startup:
//!   a string-blob [`KeyValueStore`](storage::KeyValueStore) and a
//!   best-effort [`NotificationDispatcher`](notify::NotificationDispatcher).
//! - **[lifecycle]**: [`InventorySystem`] wires everything together and owns
//!   the start/shutdown pair, including the daily reclassification timer.
//! - **[mock]**: Recording and failure-injecting doubles for both seams.
//!
//! ## Quick Start
//!
//! ```no_run
//! use shelflife_inventory::lifecycle::{InventorySystem, SystemConfig};
//! use shelflife_inventory::model::{Category, ItemDraft};
//! use shelflife_inventory::notify::LogDispatcher;
//! use shelflife_inventory::storage::MemoryStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let system = InventorySystem::start(
//!         Arc::new(MemoryStore::new()),
//!         Arc::new(LogDispatcher::new()),
//!         SystemConfig::default(),
//!     );
//!
//!     let expires = chrono::Utc::now().date_naive() + chrono::Days::new(3);
//!     let id = system
//!         .inventory
//!         .add_item(ItemDraft::new("Milk", Category::Dairy, expires))
//!         .await?;
//!     println!("alerts: {:?}", system.inventory.expiry_alerts().await?);
//!     system.inventory.mark_used(id, None).await?;
//!
//!     system.shutdown().await.map_err(Into::into)
//! }
//! ```
//!
//! ## Failure Model
//!
//! Mutating operations return `Result<_, InventoryError>`; an unknown id is
//! `ItemNotFound`, bad input is `InvalidItem`. Storage and notification
//! failures are deliberately *not* operation failures: a failed persist
//! leaves the in-memory state ahead of the durable copy until the next
//! successful write, and a failed notification call is logged and dropped.

pub mod clients;
pub mod inventory;
pub mod lifecycle;
pub mod mock;
pub mod model;
pub mod notify;
pub mod storage;

// Re-export the types most callers need.
pub use clients::InventoryClient;
pub use inventory::{InventoryActor, InventoryContext, InventoryError, ReclassifyOutcome};
pub use lifecycle::{setup_tracing, InventorySystem, SystemConfig};
pub use model::{
    Category, ExpiryAlert, InventoryFilter, InventoryItem, InventoryStats, ItemDraft, ItemId,
    ItemPatch, ItemStatus, StorageLocation, Urgency, WasteRollup,
};
