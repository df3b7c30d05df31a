//! Error type for the inventory actor and its client.

use crate::model::ItemId;

/// Errors surfaced by inventory operations.
///
/// A failed persist is deliberately NOT an error here: the in-memory
/// collection stays authoritative and may run ahead of the durable copy until
/// the next successful write. Storage failures are logged at the point of
/// occurrence instead.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("invalid item: {0}")]
    InvalidItem(String),

    #[error("malformed inventory payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("inventory actor closed")]
    ActorClosed,

    #[error("inventory actor dropped response channel")]
    ActorDropped,
}
