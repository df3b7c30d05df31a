//! The inventory actor: single owner of the in-memory item collection.
//!
//! # Concurrency Model
//! One `InventoryActor` instance owns the authoritative `HashMap` of items
//! and processes requests *sequentially* from its channel. No `Mutex` or
//! `RwLock` guards the collection: exclusive ownership inside the task is the
//! synchronization. User-driven mutations and the recurring reclassification
//! pass arrive through the same channel, so they can delay each other but
//! never interleave mid-mutation.
//!
//! # Collaborators
//! The storage backend and notification dispatcher are injected into
//! [`InventoryActor::run`] as [`InventoryContext`] (late binding: construct
//! the actor first, wire dependencies when starting it). Both collaborators
//! are best-effort from the actor's point of view: a failed persist leaves the
//! in-memory state ahead of the durable copy until the next successful write,
//! and a failed notification call is logged and discarded. Neither failure is
//! surfaced to the caller of the mutating operation.

use crate::clients::InventoryClient;
use crate::inventory::classify;
use crate::inventory::error::InventoryError;
use crate::inventory::message::{InventoryRequest, ReclassifyOutcome};
use crate::model::{
    Category, ExpiryAlert, InventoryFilter, InventoryItem, InventoryStats, ItemDraft, ItemId,
    ItemOutcome, ItemPatch, ItemStatus, Urgency, WasteRollup,
};
use crate::notify::{ExpiryReminder, LocalNotification, NotificationDispatcher, WastePrevented};
use crate::storage::{KeyValueStore, INVENTORY_KEY, WASTE_STATS_KEY};
use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use serde_json::json;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Dependencies injected when the actor starts.
pub struct InventoryContext {
    pub store: Arc<dyn KeyValueStore>,
    pub notifier: Arc<dyn NotificationDispatcher>,
}

/// Server half of the inventory tracker. Owns the item collection and the
/// receiver end of the request channel.
pub struct InventoryActor {
    receiver: mpsc::Receiver<InventoryRequest>,
    items: HashMap<ItemId, InventoryItem>,
}

impl InventoryActor {
    /// Creates the actor and its client.
    ///
    /// The actor must be driven via [`run`](Self::run); the client can be
    /// cloned and shared freely.
    pub fn new(buffer_size: usize) -> (Self, InventoryClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            items: HashMap::new(),
        };
        (actor, InventoryClient::new(sender))
    }

    /// Runs the event loop until every client is dropped.
    ///
    /// On startup the persisted collection is loaded and one reclassification
    /// pass runs immediately; the recurring pass is the lifecycle layer's job
    /// (it sends `Reclassify` requests on a timer).
    pub async fn run(mut self, ctx: InventoryContext) {
        self.load(&ctx).await;
        let startup = self.handle_reclassify(&ctx, Utc::now()).await;
        info!(
            items = self.items.len(),
            reclassified = startup.changed,
            "Inventory actor started"
        );

        while let Some(msg) = self.receiver.recv().await {
            let now = Utc::now();
            match msg {
                InventoryRequest::Add { draft, respond_to } => {
                    debug!(name = %draft.name, ?draft.category, "Add");
                    let _ = respond_to.send(self.handle_add(&ctx, draft, now).await);
                }
                InventoryRequest::Get { id, respond_to } => {
                    let item = self.items.get(&id).cloned();
                    debug!(%id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                InventoryRequest::Update {
                    id,
                    patch,
                    respond_to,
                } => {
                    debug!(%id, ?patch, "Update");
                    let _ = respond_to.send(self.handle_update(&ctx, id, patch, now).await);
                }
                InventoryRequest::Remove { id, respond_to } => {
                    debug!(%id, "Remove");
                    let _ = respond_to.send(self.handle_remove(&ctx, id).await);
                }
                InventoryRequest::Resolve {
                    id,
                    outcome,
                    notes,
                    respond_to,
                } => {
                    debug!(%id, ?outcome, "Resolve");
                    let _ = respond_to.send(self.handle_resolve(&ctx, id, outcome, notes, now).await);
                }
                InventoryRequest::Share { id, respond_to } => {
                    debug!(%id, "Share");
                    let _ = respond_to.send(self.handle_share(&ctx, id, now).await);
                }
                InventoryRequest::List { filter, respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_list(&filter)));
                }
                InventoryRequest::Alerts { respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_alerts(now)));
                }
                InventoryRequest::ExpiringWithin { days, respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_expiring_within(days, now)));
                }
                InventoryRequest::Stats { respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_stats(&ctx, now).await));
                }
                InventoryRequest::Categories { respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_categories()));
                }
                InventoryRequest::Suggest { query, respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_suggest(&query)));
                }
                InventoryRequest::Export { respond_to } => {
                    let _ = respond_to.send(self.handle_export());
                }
                InventoryRequest::Import {
                    payload,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.handle_import(&ctx, &payload).await);
                }
                InventoryRequest::Reclassify { respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_reclassify(&ctx, now).await));
                }
            }
        }

        info!(items = self.items.len(), "Inventory actor shutdown");
    }

    // --- Startup ---

    async fn load(&mut self, ctx: &InventoryContext) {
        match ctx.store.get(INVENTORY_KEY).await {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<InventoryItem>>(&blob) {
                Ok(items) => {
                    self.items = items.into_iter().map(|i| (i.id, i)).collect();
                    debug!(items = self.items.len(), "Loaded persisted inventory");
                }
                Err(error) => {
                    warn!(%error, "Persisted inventory is malformed; starting empty");
                }
            },
            Ok(None) => debug!("No persisted inventory; starting empty"),
            Err(error) => warn!(%error, "Inventory load failed; starting empty"),
        }
    }

    // --- Mutations ---

    async fn handle_add(
        &mut self,
        ctx: &InventoryContext,
        draft: ItemDraft,
        now: DateTime<Utc>,
    ) -> Result<ItemId, InventoryError> {
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(InventoryError::InvalidItem("name must not be empty".into()));
        }
        let quantity = draft.quantity.unwrap_or(1.0);
        validate_quantity(quantity)?;
        let price = draft.price.unwrap_or(0.0);
        validate_price(price)?;

        let id = ItemId::generate();
        let mut item = InventoryItem {
            id,
            name,
            original_name: draft.original_name,
            category: draft.category,
            quantity,
            unit: draft.unit.unwrap_or_else(|| "pieces".to_string()),
            price,
            expires_on: draft.expires_on,
            location: draft
                .location
                .unwrap_or_else(|| draft.category.default_location()),
            notes: draft.notes,
            photos: Vec::new(),
            shared_in_marketplace: false,
            notification_ids: Vec::new(),
            status: ItemStatus::Fresh,
            added_at: now,
            updated_at: now,
            consumed_at: None,
        };
        item.status = classify::status_for(&item, now);

        if let Some(notification_id) = self.schedule_reminder(ctx, &item, now).await {
            item.notification_ids.push(notification_id);
        }

        self.items.insert(id, item);
        info!(%id, size = self.items.len(), "Item added");
        self.persist_items(ctx).await;
        Ok(id)
    }

    async fn handle_update(
        &mut self,
        ctx: &InventoryContext,
        id: ItemId,
        patch: ItemPatch,
        now: DateTime<Utc>,
    ) -> Result<InventoryItem, InventoryError> {
        if let Some(quantity) = patch.quantity {
            validate_quantity(quantity)?;
        }
        if let Some(price) = patch.price {
            validate_price(price)?;
        }
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(InventoryError::InvalidItem("name must not be empty".into()));
            }
        }

        let item = self
            .items
            .get_mut(&id)
            .ok_or(InventoryError::ItemNotFound(id))?;

        if let Some(name) = patch.name {
            item.name = name.trim().to_string();
        }
        if let Some(original_name) = patch.original_name {
            item.original_name = Some(original_name);
        }
        if let Some(category) = patch.category {
            item.category = category;
        }
        if let Some(quantity) = patch.quantity {
            item.quantity = quantity;
        }
        if let Some(unit) = patch.unit {
            item.unit = unit;
        }
        if let Some(price) = patch.price {
            item.price = price;
        }
        // A changed expiry date does not reschedule the reminder; that is the
        // caller's responsibility.
        if let Some(expires_on) = patch.expires_on {
            item.expires_on = expires_on;
        }
        if let Some(location) = patch.location {
            item.location = location;
        }
        if let Some(notes) = patch.notes {
            item.notes = Some(notes);
        }
        if let Some(photos) = patch.photos {
            item.photos = photos;
        }
        if let Some(status) = patch.status {
            item.status = status;
        }
        item.updated_at = now;

        let snapshot = item.clone();
        info!(%id, "Item updated");
        self.persist_items(ctx).await;
        Ok(snapshot)
    }

    async fn handle_remove(
        &mut self,
        ctx: &InventoryContext,
        id: ItemId,
    ) -> Result<(), InventoryError> {
        let item = self
            .items
            .remove(&id)
            .ok_or(InventoryError::ItemNotFound(id))?;
        self.cancel_reminders(ctx, &id, item.notification_ids).await;
        info!(%id, size = self.items.len(), "Item removed");
        self.persist_items(ctx).await;
        Ok(())
    }

    async fn handle_resolve(
        &mut self,
        ctx: &InventoryContext,
        id: ItemId,
        outcome: ItemOutcome,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<InventoryItem, InventoryError> {
        let item = self
            .items
            .get_mut(&id)
            .ok_or(InventoryError::ItemNotFound(id))?;

        let was_terminal = item.status.is_terminal();
        item.status = outcome.status();
        if outcome == ItemOutcome::Used {
            item.consumed_at = Some(now);
        }
        if let Some(extra) = notes {
            item.notes = Some(match item.notes.take() {
                Some(previous) => format!("{previous}\n{extra}"),
                None => extra,
            });
        }
        item.updated_at = now;
        let pending = std::mem::take(&mut item.notification_ids);
        let snapshot = item.clone();

        self.cancel_reminders(ctx, &id, pending).await;
        // Repeat calls on an already-resolved item bump timestamps and notes
        // but must not credit the rollup twice.
        if !was_terminal {
            self.credit_waste(ctx, &snapshot, now).await;
        }
        info!(%id, status = ?snapshot.status, "Item resolved");
        self.persist_items(ctx).await;
        Ok(snapshot)
    }

    async fn handle_share(
        &mut self,
        ctx: &InventoryContext,
        id: ItemId,
        now: DateTime<Utc>,
    ) -> Result<(), InventoryError> {
        let item = self
            .items
            .get_mut(&id)
            .ok_or(InventoryError::ItemNotFound(id))?;
        item.shared_in_marketplace = true;
        item.updated_at = now;
        info!(%id, "Item shared in marketplace");
        self.persist_items(ctx).await;
        Ok(())
    }

    async fn handle_import(
        &mut self,
        ctx: &InventoryContext,
        payload: &str,
    ) -> Result<usize, InventoryError> {
        // Parse into a temporary collection first and swap only on success:
        // a malformed payload must never clear existing state.
        let imported: Vec<InventoryItem> = serde_json::from_str(payload)?;
        let count = imported.len();
        self.items = imported.into_iter().map(|i| (i.id, i)).collect();
        info!(items = count, "Inventory imported");
        self.persist_items(ctx).await;
        Ok(count)
    }

    async fn handle_reclassify(
        &mut self,
        ctx: &InventoryContext,
        now: DateTime<Utc>,
    ) -> ReclassifyOutcome {
        let mut reviewed = 0;
        let mut changed = 0;
        for item in self.items.values_mut() {
            if item.status.is_terminal() {
                continue;
            }
            reviewed += 1;
            let next = classify::status_for(item, now);
            if next != item.status {
                item.status = next;
                item.updated_at = now;
                changed += 1;
            }
        }
        if changed > 0 {
            debug!(reviewed, changed, "Reclassification pass updated items");
            self.persist_items(ctx).await;
        }

        let urgent = self
            .items
            .values()
            .filter_map(|item| classify::alert_for(item, now))
            .filter(|alert| alert.urgency.rank() <= Urgency::High.rank())
            .count();
        if urgent > 0 {
            let note = LocalNotification {
                title: "Food expiry alert".to_string(),
                body: format!("You have {urgent} items that need attention"),
                data: json!({ "urgentCount": urgent }),
                sound: Some("default".to_string()),
            };
            if let Err(error) = ctx.notifier.send_local_notification(&note).await {
                warn!(%error, "Expiry summary notification failed");
            }
        }

        ReclassifyOutcome {
            reviewed,
            changed,
            urgent,
        }
    }

    // --- Derived reads ---

    fn handle_list(&self, filter: &InventoryFilter) -> Vec<InventoryItem> {
        let mut items: Vec<InventoryItem> = self
            .items
            .values()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect();
        items.sort_by_key(|item| (item.expires_on, item.id));
        items
    }

    fn handle_alerts(&self, now: DateTime<Utc>) -> Vec<ExpiryAlert> {
        let mut alerts: Vec<ExpiryAlert> = self
            .items
            .values()
            .filter_map(|item| classify::alert_for(item, now))
            .collect();
        classify::sort_alerts(&mut alerts);
        alerts
    }

    fn handle_expiring_within(&self, days: i64, now: DateTime<Utc>) -> Vec<InventoryItem> {
        let mut items: Vec<InventoryItem> = self
            .items
            .values()
            .filter(|item| {
                !item.status.is_terminal() && classify::days_until(item, now) <= days
            })
            .cloned()
            .collect();
        items.sort_by_key(|item| (item.expires_on, item.id));
        items
    }

    async fn handle_stats(&self, ctx: &InventoryContext, now: DateTime<Utc>) -> InventoryStats {
        let mut by_category = InventoryStats::zeroed_categories();
        let mut fresh = 0;
        let mut nearing = 0;
        let mut expired = 0;
        for item in self.items.values() {
            if let Some(count) = by_category.get_mut(&item.category) {
                *count += 1;
            }
            match item.status {
                ItemStatus::Fresh => fresh += 1,
                ItemStatus::Nearing => nearing += 1,
                ItemStatus::Expired => expired += 1,
                _ => {}
            }
        }
        InventoryStats {
            total: self.items.len(),
            fresh,
            nearing,
            expired,
            by_category,
            waste_prevention: self.load_rollup(ctx, now.month0()).await,
        }
    }

    fn handle_categories(&self) -> Vec<Category> {
        let distinct: BTreeSet<Category> = self.items.values().map(|item| item.category).collect();
        distinct.into_iter().collect()
    }

    fn handle_suggest(&self, query: &str) -> Vec<String> {
        let needle = query.to_lowercase();
        let mut names: Vec<String> = self
            .items
            .values()
            .filter(|item| item.name.to_lowercase().contains(&needle))
            .map(|item| item.name.clone())
            .collect();
        names.sort();
        names.dedup();
        names.truncate(10);
        names
    }

    fn handle_export(&self) -> Result<String, InventoryError> {
        let mut items: Vec<&InventoryItem> = self.items.values().collect();
        items.sort_by_key(|item| item.id);
        Ok(serde_json::to_string(&items)?)
    }

    // --- Side effects ---

    /// Schedule a reminder one day before expiry, if that instant is still in
    /// the future. Best-effort: a dispatcher failure is logged and discarded.
    async fn schedule_reminder(
        &self,
        ctx: &InventoryContext,
        item: &InventoryItem,
        now: DateTime<Utc>,
    ) -> Option<String> {
        let remind_at = item.expires_on.and_time(NaiveTime::MIN).and_utc() - Duration::days(1);
        if remind_at <= now {
            return None;
        }
        let reminder = ExpiryReminder {
            item_id: item.id,
            name: item.name.clone(),
            expires_on: item.expires_on,
        };
        match ctx.notifier.schedule_expiry_reminder(&reminder).await {
            Ok(notification_id) => notification_id,
            Err(error) => {
                warn!(item_id = %item.id, %error, "Reminder scheduling failed");
                None
            }
        }
    }

    async fn cancel_reminders(
        &self,
        ctx: &InventoryContext,
        id: &ItemId,
        notification_ids: Vec<String>,
    ) {
        for notification_id in notification_ids {
            if let Err(error) = ctx.notifier.cancel_notification(&notification_id).await {
                warn!(item_id = %id, notification_id, %error, "Reminder cancellation failed");
            }
        }
    }

    async fn credit_waste(
        &self,
        ctx: &InventoryContext,
        item: &InventoryItem,
        now: DateTime<Utc>,
    ) {
        let month = now.month0();
        let mut rollup = self.load_rollup(ctx, month).await;
        classify::credit_rollup(&mut rollup, item.price, item.category, month);

        // Every tenth saved item earns a celebratory notification with the
        // running totals.
        if rollup.item_count % 10 == 0 {
            let summary = WastePrevented {
                items_saved: rollup.item_count,
                money_saved: rollup.estimated_value,
                co2_saved_kg: rollup.co2_saved,
            };
            if let Err(error) = ctx.notifier.notify_waste_prevented(&summary).await {
                warn!(%error, "Waste-prevention notification failed");
            }
        }

        match serde_json::to_string(&rollup) {
            Ok(blob) => {
                if let Err(error) = ctx.store.set(WASTE_STATS_KEY, &blob).await {
                    warn!(%error, "Waste stats persist failed");
                }
            }
            Err(error) => warn!(%error, "Waste stats serialization failed"),
        }
    }

    async fn load_rollup(&self, ctx: &InventoryContext, month: u32) -> WasteRollup {
        match ctx.store.get(WASTE_STATS_KEY).await {
            Ok(Some(blob)) => match serde_json::from_str(&blob) {
                Ok(rollup) => rollup,
                Err(error) => {
                    warn!(%error, "Persisted waste stats are malformed; resetting");
                    WasteRollup::empty(month)
                }
            },
            Ok(None) => WasteRollup::empty(month),
            Err(error) => {
                warn!(%error, "Waste stats read failed; using empty rollup");
                WasteRollup::empty(month)
            }
        }
    }

    async fn persist_items(&self, ctx: &InventoryContext) {
        let mut items: Vec<&InventoryItem> = self.items.values().collect();
        items.sort_by_key(|item| item.id);
        let blob = match serde_json::to_string(&items) {
            Ok(blob) => blob,
            Err(error) => {
                warn!(%error, "Inventory serialization failed; skipping persist");
                return;
            }
        };
        if let Err(error) = ctx.store.set(INVENTORY_KEY, &blob).await {
            warn!(%error, "Inventory persist failed; in-memory state is ahead of storage");
        }
    }
}

fn validate_quantity(quantity: f64) -> Result<(), InventoryError> {
    if quantity.is_finite() && quantity > 0.0 {
        Ok(())
    } else {
        Err(InventoryError::InvalidItem(format!(
            "quantity must be positive, got {quantity}"
        )))
    }
}

fn validate_price(price: f64) -> Result<(), InventoryError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(InventoryError::InvalidItem(format!(
            "price must be non-negative, got {price}"
        )))
    }
}
