//! Request messages exchanged between [`InventoryClient`] and
//! [`InventoryActor`].
//!
//! Each variant carries its payload plus a oneshot `respond_to` channel; the
//! actor replies exactly once per request. This is the standard
//! request/response actor shape: the mpsc side serializes mutations, the
//! oneshot side gives every caller a typed reply.
//!
//! [`InventoryClient`]: crate::clients::InventoryClient
//! [`InventoryActor`]: crate::inventory::InventoryActor

use crate::inventory::error::InventoryError;
use crate::model::{
    ExpiryAlert, InventoryFilter, InventoryItem, InventoryStats, ItemDraft, ItemId, ItemOutcome,
    ItemPatch,
};
use tokio::sync::oneshot;

/// One-shot reply channel used by the actor.
pub type Reply<T> = oneshot::Sender<Result<T, InventoryError>>;

/// What a reclassification pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReclassifyOutcome {
    /// Non-terminal items re-evaluated.
    pub reviewed: usize,
    /// Items whose status changed this pass.
    pub changed: usize,
    /// Items currently at expired or high urgency.
    pub urgent: usize,
}

#[derive(Debug)]
pub enum InventoryRequest {
    Add {
        draft: ItemDraft,
        respond_to: Reply<ItemId>,
    },
    Get {
        id: ItemId,
        respond_to: Reply<Option<InventoryItem>>,
    },
    Update {
        id: ItemId,
        patch: ItemPatch,
        respond_to: Reply<InventoryItem>,
    },
    Remove {
        id: ItemId,
        respond_to: Reply<()>,
    },
    /// Terminal transition: mark used, donated or sold.
    Resolve {
        id: ItemId,
        outcome: ItemOutcome,
        notes: Option<String>,
        respond_to: Reply<InventoryItem>,
    },
    Share {
        id: ItemId,
        respond_to: Reply<()>,
    },
    List {
        filter: InventoryFilter,
        respond_to: Reply<Vec<InventoryItem>>,
    },
    Alerts {
        respond_to: Reply<Vec<ExpiryAlert>>,
    },
    ExpiringWithin {
        days: i64,
        respond_to: Reply<Vec<InventoryItem>>,
    },
    Stats {
        respond_to: Reply<InventoryStats>,
    },
    Categories {
        respond_to: Reply<Vec<crate::model::Category>>,
    },
    Suggest {
        query: String,
        respond_to: Reply<Vec<String>>,
    },
    Export {
        respond_to: Reply<String>,
    },
    Import {
        payload: String,
        respond_to: Reply<usize>,
    },
    Reclassify {
        respond_to: Reply<ReclassifyOutcome>,
    },
}
