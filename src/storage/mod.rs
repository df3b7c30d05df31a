//! Key-value persistence seam.
//!
//! The tracker persists two opaque text blobs: the serialized item collection
//! and the monthly waste rollup. The backend is chosen once at construction
//! time and injected into the actor; nothing branches on the platform
//! per-call. Two backends are provided: [`MemoryStore`] (ephemeral) and
//! [`FileStore`] (one file per key on local disk).

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;

/// Key for the serialized item collection.
pub const INVENTORY_KEY: &str = "inventory";
/// Key for the monthly waste-prevention rollup.
pub const WASTE_STATS_KEY: &str = "wastePreventionStats";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// String-blob key-value storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
