//! # Inventory Client
//!
//! Type-safe, cloneable handle for talking to the inventory actor. Each
//! method sends one request over the mpsc channel and awaits the reply on a
//! oneshot channel. Cloning is cheap: the client holds only a sender.

use crate::inventory::error::InventoryError;
use crate::inventory::message::{InventoryRequest, ReclassifyOutcome};
use crate::model::{
    Category, ExpiryAlert, InventoryFilter, InventoryItem, InventoryStats, ItemDraft, ItemId,
    ItemOutcome, ItemPatch,
};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// Client for interacting with the inventory actor.
#[derive(Clone)]
pub struct InventoryClient {
    sender: mpsc::Sender<InventoryRequest>,
}

impl InventoryClient {
    pub fn new(sender: mpsc::Sender<InventoryRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<T, InventoryError>>) -> InventoryRequest,
    ) -> Result<T, InventoryError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| InventoryError::ActorClosed)?;
        response.await.map_err(|_| InventoryError::ActorDropped)?
    }

    /// Add a new item; returns its generated id.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn add_item(&self, draft: ItemDraft) -> Result<ItemId, InventoryError> {
        debug!("Sending add request");
        self.request(|respond_to| InventoryRequest::Add { draft, respond_to })
            .await
    }

    /// Fetch one item by id.
    pub async fn item(&self, id: ItemId) -> Result<Option<InventoryItem>, InventoryError> {
        self.request(|respond_to| InventoryRequest::Get { id, respond_to })
            .await
    }

    /// Merge the patch onto an existing item and return the updated state.
    ///
    /// Changing the expiry date here does not reschedule the reminder.
    #[instrument(skip(self, patch))]
    pub async fn update_item(
        &self,
        id: ItemId,
        patch: ItemPatch,
    ) -> Result<InventoryItem, InventoryError> {
        debug!("Sending update request");
        self.request(|respond_to| InventoryRequest::Update {
            id,
            patch,
            respond_to,
        })
        .await
    }

    /// Physically remove an item and cancel its pending reminders.
    #[instrument(skip(self))]
    pub async fn remove_item(&self, id: ItemId) -> Result<(), InventoryError> {
        self.request(|respond_to| InventoryRequest::Remove { id, respond_to })
            .await
    }

    /// Mark an item as used, crediting the monthly waste rollup.
    #[instrument(skip(self, notes))]
    pub async fn mark_used(
        &self,
        id: ItemId,
        notes: Option<String>,
    ) -> Result<InventoryItem, InventoryError> {
        self.resolve(id, ItemOutcome::Used, notes).await
    }

    /// Mark an item as donated.
    #[instrument(skip(self, notes))]
    pub async fn mark_donated(
        &self,
        id: ItemId,
        notes: Option<String>,
    ) -> Result<InventoryItem, InventoryError> {
        self.resolve(id, ItemOutcome::Donated, notes).await
    }

    /// Mark an item as sold through the marketplace.
    #[instrument(skip(self, notes))]
    pub async fn mark_sold(
        &self,
        id: ItemId,
        notes: Option<String>,
    ) -> Result<InventoryItem, InventoryError> {
        self.resolve(id, ItemOutcome::Sold, notes).await
    }

    async fn resolve(
        &self,
        id: ItemId,
        outcome: ItemOutcome,
        notes: Option<String>,
    ) -> Result<InventoryItem, InventoryError> {
        debug!(%id, ?outcome, "Sending resolve request");
        self.request(|respond_to| InventoryRequest::Resolve {
            id,
            outcome,
            notes,
            respond_to,
        })
        .await
    }

    /// Flag an item as offered in the local marketplace.
    #[instrument(skip(self))]
    pub async fn share_in_marketplace(&self, id: ItemId) -> Result<(), InventoryError> {
        self.request(|respond_to| InventoryRequest::Share { id, respond_to })
            .await
    }

    /// List items matching the filter, sorted by ascending expiry date.
    pub async fn list(
        &self,
        filter: InventoryFilter,
    ) -> Result<Vec<InventoryItem>, InventoryError> {
        self.request(|respond_to| InventoryRequest::List { filter, respond_to })
            .await
    }

    /// Current expiry alerts, most urgent first.
    pub async fn expiry_alerts(&self) -> Result<Vec<ExpiryAlert>, InventoryError> {
        self.request(|respond_to| InventoryRequest::Alerts { respond_to })
            .await
    }

    /// Non-terminal items whose expiry is at most `days` away (including
    /// already-expired ones), soonest first.
    pub async fn expiring_within(&self, days: i64) -> Result<Vec<InventoryItem>, InventoryError> {
        self.request(|respond_to| InventoryRequest::ExpiringWithin { days, respond_to })
            .await
    }

    /// Aggregate snapshot of the collection plus the persisted waste rollup.
    pub async fn stats(&self) -> Result<InventoryStats, InventoryError> {
        self.request(|respond_to| InventoryRequest::Stats { respond_to })
            .await
    }

    /// Distinct categories currently present in the collection.
    pub async fn categories_in_use(&self) -> Result<Vec<Category>, InventoryError> {
        self.request(|respond_to| InventoryRequest::Categories { respond_to })
            .await
    }

    /// Up to ten distinct item names matching the query, for typeahead.
    pub async fn search_suggestions(
        &self,
        query: impl Into<String>,
    ) -> Result<Vec<String>, InventoryError> {
        let query = query.into();
        self.request(|respond_to| InventoryRequest::Suggest { query, respond_to })
            .await
    }

    /// Serialize the full collection to a transport string.
    pub async fn export(&self) -> Result<String, InventoryError> {
        self.request(|respond_to| InventoryRequest::Export { respond_to })
            .await
    }

    /// Replace the collection with a previously exported payload. Returns the
    /// number of imported items. A malformed payload leaves state untouched.
    #[instrument(skip(self, payload))]
    pub async fn import(&self, payload: impl Into<String>) -> Result<usize, InventoryError> {
        let payload = payload.into();
        debug!(bytes = payload.len(), "Sending import request");
        self.request(|respond_to| InventoryRequest::Import {
            payload,
            respond_to,
        })
        .await
    }

    /// Run one reclassification pass now. The lifecycle timer calls this on
    /// an interval; tests call it directly to avoid timers.
    pub async fn reclassify(&self) -> Result<ReclassifyOutcome, InventoryError> {
        self.request(|respond_to| InventoryRequest::Reclassify { respond_to })
            .await
    }
}
