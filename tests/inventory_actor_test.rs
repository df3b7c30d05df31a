//! Actor-level tests: spawn the inventory actor with in-memory doubles and
//! drive it through its client.

use chrono::{Days, Utc};
use shelflife_inventory::mock::{FlakyStore, RecordingDispatcher};
use shelflife_inventory::model::{
    Category, InventoryFilter, ItemDraft, ItemPatch, ItemStatus, StorageLocation,
};
use shelflife_inventory::storage::{KeyValueStore, MemoryStore};
use shelflife_inventory::{InventoryActor, InventoryClient, InventoryContext, InventoryError};
use std::sync::Arc;

fn spawn_actor(store: Arc<dyn KeyValueStore>, notifier: Arc<RecordingDispatcher>) -> InventoryClient {
    let (actor, client) = InventoryActor::new(16);
    tokio::spawn(actor.run(InventoryContext { store, notifier }));
    client
}

fn fresh_actor() -> (InventoryClient, Arc<RecordingDispatcher>) {
    let notifier = Arc::new(RecordingDispatcher::new());
    let client = spawn_actor(Arc::new(MemoryStore::new()), notifier.clone());
    (client, notifier)
}

fn draft(name: &str, category: Category, days_from_now: i64) -> ItemDraft {
    let today = Utc::now().date_naive();
    let expires_on = if days_from_now >= 0 {
        today + Days::new(days_from_now as u64)
    } else {
        today - Days::new(days_from_now.unsigned_abs())
    };
    ItemDraft::new(name, category, expires_on)
}

#[tokio::test]
async fn initial_status_follows_expiry_date() {
    let (client, _notifier) = fresh_actor();

    let expired = client.add_item(draft("Old yogurt", Category::Dairy, -3)).await.unwrap();
    let nearing_today = client.add_item(draft("Salad", Category::Vegetables, 0)).await.unwrap();
    let nearing_soon = client.add_item(draft("Ham", Category::Meat, 2)).await.unwrap();
    let fresh = client.add_item(draft("Rice", Category::Pantry, 3)).await.unwrap();

    let status = |id| {
        let client = client.clone();
        async move { client.item(id).await.unwrap().unwrap().status }
    };
    assert_eq!(status(expired).await, ItemStatus::Expired);
    assert_eq!(status(nearing_today).await, ItemStatus::Nearing);
    assert_eq!(status(nearing_soon).await, ItemStatus::Nearing);
    assert_eq!(status(fresh).await, ItemStatus::Fresh);
}

#[tokio::test]
async fn milk_expiring_tomorrow_is_nearing_and_defaults_to_fridge() {
    let (client, _notifier) = fresh_actor();

    let id = client.add_item(draft("Milk", Category::Dairy, 1)).await.unwrap();
    let milk = client.item(id).await.unwrap().unwrap();

    assert_eq!(milk.status, ItemStatus::Nearing);
    assert_eq!(milk.location, StorageLocation::Fridge);
    assert_eq!(milk.unit, "pieces");
    assert_eq!(milk.quantity, 1.0);
    assert_eq!(milk.price, 0.0);
}

#[tokio::test]
async fn rice_a_month_out_is_fresh_and_sorts_last() {
    let (client, _notifier) = fresh_actor();

    client.add_item(draft("Milk", Category::Dairy, 1)).await.unwrap();
    client.add_item(draft("Chicken", Category::Meat, 4)).await.unwrap();
    let rice = client.add_item(draft("Rice", Category::Pantry, 30)).await.unwrap();

    let items = client.list(InventoryFilter::default()).await.unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items.last().unwrap().id, rice);
    assert_eq!(items.last().unwrap().status, ItemStatus::Fresh);
    // Ascending by expiry date.
    assert!(items.windows(2).all(|w| w[0].expires_on <= w[1].expires_on));
}

#[tokio::test]
async fn add_rejects_bad_input() {
    let (client, _notifier) = fresh_actor();

    let mut no_name = draft("   ", Category::Other, 5);
    no_name.quantity = Some(1.0);
    assert!(matches!(
        client.add_item(no_name).await,
        Err(InventoryError::InvalidItem(_))
    ));

    let mut zero_quantity = draft("Eggs", Category::Dairy, 5);
    zero_quantity.quantity = Some(0.0);
    assert!(matches!(
        client.add_item(zero_quantity).await,
        Err(InventoryError::InvalidItem(_))
    ));

    let mut negative_price = draft("Eggs", Category::Dairy, 5);
    negative_price.price = Some(-1.0);
    assert!(matches!(
        client.add_item(negative_price).await,
        Err(InventoryError::InvalidItem(_))
    ));

    assert!(client.list(InventoryFilter::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn expired_item_alerts_with_exact_actions() {
    let (client, _notifier) = fresh_actor();

    client.add_item(draft("Forgotten cheese", Category::Dairy, -5)).await.unwrap();

    let alerts = client.expiry_alerts().await.unwrap();
    assert_eq!(alerts.len(), 1);
    let alert = &alerts[0];
    assert!(alert.days_until_expiry < 0);
    assert_eq!(
        alert.suggested_actions,
        vec!["Discard safely", "Check if still usable"]
    );
}

#[tokio::test]
async fn alerts_skip_terminal_items_and_far_out_items() {
    let (client, _notifier) = fresh_actor();

    let used = client.add_item(draft("Leftovers", Category::Other, 1)).await.unwrap();
    client.mark_used(used, None).await.unwrap();
    client.add_item(draft("Canned beans", Category::Pantry, 60)).await.unwrap();
    client.add_item(draft("Berries", Category::Fruits, 2)).await.unwrap();

    let alerts = client.expiry_alerts().await.unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].name, "Berries");
    assert!(alerts.iter().all(|a| a.days_until_expiry <= 7));
}

#[tokio::test]
async fn alerts_order_by_urgency_then_days() {
    let (client, _notifier) = fresh_actor();

    client.add_item(draft("Low", Category::Pantry, 6)).await.unwrap();
    client.add_item(draft("High", Category::Dairy, 1)).await.unwrap();
    client.add_item(draft("Expired", Category::Meat, -2)).await.unwrap();
    client.add_item(draft("Medium", Category::Bakery, 3)).await.unwrap();

    let alerts = client.expiry_alerts().await.unwrap();
    let names: Vec<&str> = alerts.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Expired", "High", "Medium", "Low"]);

    let ranks: Vec<u8> = alerts.iter().map(|a| a.urgency.rank()).collect();
    assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn mark_used_is_idempotent_on_status_but_appends_notes() {
    let (client, _notifier) = fresh_actor();

    let id = client.add_item(draft("Bread", Category::Bakery, 2)).await.unwrap();

    let first = client.mark_used(id, Some("toast".to_string())).await.unwrap();
    assert_eq!(first.status, ItemStatus::Used);
    assert!(first.consumed_at.is_some());

    let second = client.mark_used(id, Some("more toast".to_string())).await.unwrap();
    assert_eq!(second.status, ItemStatus::Used);
    assert_eq!(second.notes.as_deref(), Some("toast\nmore toast"));
    assert!(second.updated_at >= first.updated_at);
}

#[tokio::test]
async fn mark_used_unknown_id_fails_and_leaves_collection_unchanged() {
    let (client, _notifier) = fresh_actor();

    client.add_item(draft("Apples", Category::Fruits, 4)).await.unwrap();
    let before = client.list(InventoryFilter::default()).await.unwrap();

    let bogus = shelflife_inventory::ItemId::generate();
    let result = client.mark_used(bogus, None).await;
    assert!(matches!(result, Err(InventoryError::ItemNotFound(_))));

    let after = client.list(InventoryFilter::default()).await.unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn terminal_statuses_survive_reclassification() {
    let (client, _notifier) = fresh_actor();

    let donated = client.add_item(draft("Pasta", Category::Pantry, 10)).await.unwrap();
    client.mark_donated(donated, None).await.unwrap();

    let stale = client.add_item(draft("Juice", Category::Beverages, 10)).await.unwrap();

    // Pull both expiry dates into the past, then reclassify.
    let yesterday = Utc::now().date_naive() - Days::new(1);
    let patch = ItemPatch {
        expires_on: Some(yesterday),
        ..Default::default()
    };
    client.update_item(donated, patch.clone()).await.unwrap();
    client.update_item(stale, patch).await.unwrap();

    let outcome = client.reclassify().await.unwrap();
    assert_eq!(outcome.reviewed, 1);
    assert_eq!(outcome.changed, 1);

    assert_eq!(
        client.item(donated).await.unwrap().unwrap().status,
        ItemStatus::Donated
    );
    assert_eq!(
        client.item(stale).await.unwrap().unwrap().status,
        ItemStatus::Expired
    );
}

#[tokio::test]
async fn update_merges_only_present_fields() {
    let (client, _notifier) = fresh_actor();

    let mut original = draft("Cheddar", Category::Dairy, 5);
    original.price = Some(4.0);
    original.notes = Some("block".to_string());
    let id = client.add_item(original).await.unwrap();

    let updated = client
        .update_item(
            id,
            ItemPatch {
                quantity: Some(2.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.quantity, 2.0);
    assert_eq!(updated.name, "Cheddar");
    assert_eq!(updated.price, 4.0);
    assert_eq!(updated.notes.as_deref(), Some("block"));

    assert!(matches!(
        client
            .update_item(
                shelflife_inventory::ItemId::generate(),
                ItemPatch::default()
            )
            .await,
        Err(InventoryError::ItemNotFound(_))
    ));
}

#[tokio::test]
async fn share_sets_marketplace_flag_only() {
    let (client, _notifier) = fresh_actor();

    let id = client.add_item(draft("Surplus squash", Category::Vegetables, 6)).await.unwrap();
    client.share_in_marketplace(id).await.unwrap();

    let item = client.item(id).await.unwrap().unwrap();
    assert!(item.shared_in_marketplace);
    assert_eq!(item.status, ItemStatus::Fresh);
}

#[tokio::test]
async fn filters_narrow_by_status_category_location_and_search() {
    let (client, _notifier) = fresh_actor();

    let mut milk = draft("Whole milk", Category::Dairy, 1);
    milk.original_name = Some("MLK WHL 3.5%".to_string());
    client.add_item(milk).await.unwrap();
    client.add_item(draft("Frozen peas", Category::Frozen, 90)).await.unwrap();
    client.add_item(draft("Oat bar", Category::Snacks, 40)).await.unwrap();

    let by_status = client
        .list(InventoryFilter {
            statuses: Some(vec![ItemStatus::Nearing]),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_status.len(), 1);
    assert_eq!(by_status[0].name, "Whole milk");

    let by_category = client
        .list(InventoryFilter {
            categories: Some(vec![Category::Frozen, Category::Snacks]),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_category.len(), 2);

    let by_location = client
        .list(InventoryFilter {
            locations: Some(vec![StorageLocation::Freezer]),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_location.len(), 1);
    assert_eq!(by_location[0].name, "Frozen peas");

    // Substring match against the receipt name, case-insensitively.
    let by_search = client
        .list(InventoryFilter {
            search: Some("mlk".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_search.len(), 1);
    assert_eq!(by_search[0].name, "Whole milk");
}

#[tokio::test]
async fn export_import_round_trips_the_collection() {
    let (client, _notifier) = fresh_actor();

    let mut milk = draft("Milk", Category::Dairy, 2);
    milk.price = Some(2.49);
    client.add_item(milk).await.unwrap();
    client.add_item(draft("Rice", Category::Pantry, 30)).await.unwrap();
    let exported = client.export().await.unwrap();
    let original = client.list(InventoryFilter::default()).await.unwrap();

    // Import into a second, empty tracker.
    let (other, _n) = fresh_actor();
    let count = other.import(exported).await.unwrap();
    assert_eq!(count, 2);

    let imported = other.list(InventoryFilter::default()).await.unwrap();
    assert_eq!(imported, original);
}

#[tokio::test]
async fn malformed_import_fails_without_touching_state() {
    let (client, _notifier) = fresh_actor();

    client.add_item(draft("Keeper", Category::Other, 9)).await.unwrap();
    let before = client.list(InventoryFilter::default()).await.unwrap();

    let result = client.import("{not json").await;
    assert!(matches!(result, Err(InventoryError::Malformed(_))));

    let after = client.list(InventoryFilter::default()).await.unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn remove_deletes_item_and_cancels_reminders() {
    let (client, notifier) = fresh_actor();

    let id = client.add_item(draft("Steak", Category::Meat, 3)).await.unwrap();
    let item = client.item(id).await.unwrap().unwrap();
    assert_eq!(item.notification_ids.len(), 1);

    client.remove_item(id).await.unwrap();
    assert!(client.item(id).await.unwrap().is_none());
    assert_eq!(notifier.cancelled(), item.notification_ids);

    assert!(matches!(
        client.remove_item(id).await,
        Err(InventoryError::ItemNotFound(_))
    ));
}

#[tokio::test]
async fn reminders_only_scheduled_when_still_in_the_future() {
    let (client, notifier) = fresh_actor();

    // One day before a tomorrow-expiry is already past; no reminder.
    client.add_item(draft("Milk", Category::Dairy, 1)).await.unwrap();
    assert!(notifier.scheduled().is_empty());

    // Two days out leaves tomorrow free for the reminder.
    client.add_item(draft("Cream", Category::Dairy, 2)).await.unwrap();
    let scheduled = notifier.scheduled();
    assert_eq!(scheduled.len(), 1);
    assert_eq!(scheduled[0].name, "Cream");
}

#[tokio::test]
async fn expiring_within_includes_expired_and_sorts_soonest_first() {
    let (client, _notifier) = fresh_actor();

    client.add_item(draft("Gone", Category::Dairy, -1)).await.unwrap();
    client.add_item(draft("Soon", Category::Meat, 2)).await.unwrap();
    client.add_item(draft("Later", Category::Pantry, 14)).await.unwrap();
    let done = client.add_item(draft("Done", Category::Other, 1)).await.unwrap();
    client.mark_used(done, None).await.unwrap();

    let expiring = client.expiring_within(3).await.unwrap();
    let names: Vec<&str> = expiring.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Gone", "Soon"]);
}

#[tokio::test]
async fn categories_and_suggestions_reflect_collection() {
    let (client, _notifier) = fresh_actor();

    client.add_item(draft("Gala apples", Category::Fruits, 5)).await.unwrap();
    client.add_item(draft("Apple juice", Category::Beverages, 20)).await.unwrap();
    client.add_item(draft("Milk", Category::Dairy, 2)).await.unwrap();

    let categories = client.categories_in_use().await.unwrap();
    assert_eq!(
        categories,
        vec![Category::Fruits, Category::Dairy, Category::Beverages]
    );

    let suggestions = client.search_suggestions("apple").await.unwrap();
    assert_eq!(suggestions, vec!["Apple juice", "Gala apples"]);

    assert!(client.search_suggestions("tofu").await.unwrap().is_empty());
}

#[tokio::test]
async fn notification_failures_never_fail_operations() {
    let notifier = Arc::new(RecordingDispatcher::new());
    notifier.set_failing(true);
    let client = spawn_actor(Arc::new(MemoryStore::new()), notifier.clone());

    let id = client.add_item(draft("Yogurt", Category::Dairy, 3)).await.unwrap();
    let resolved = client.mark_used(id, None).await.unwrap();
    assert_eq!(resolved.status, ItemStatus::Used);
    assert!(notifier.scheduled().is_empty());
}

#[tokio::test]
async fn storage_failures_leave_memory_authoritative() {
    let store = Arc::new(FlakyStore::new());
    store.set_fail_writes(true);
    let notifier = Arc::new(RecordingDispatcher::new());
    let client = spawn_actor(store.clone(), notifier);

    // Persist fails behind the scenes; the mutation still succeeds.
    let id = client.add_item(draft("Milk", Category::Dairy, 4)).await.unwrap();
    assert!(client.item(id).await.unwrap().is_some());

    // And once the store recovers, the next mutation writes everything.
    store.set_fail_writes(false);
    client.share_in_marketplace(id).await.unwrap();
    let blob = store.get("inventory").await.unwrap().unwrap();
    assert!(blob.contains("Milk"));
}

#[tokio::test]
async fn unreadable_storage_starts_empty() {
    let store = Arc::new(FlakyStore::new());
    store.seed("inventory", r#"[{"broken": true}]"#).await;
    store.set_fail_reads(true);
    let notifier = Arc::new(RecordingDispatcher::new());
    let client = spawn_actor(store, notifier);

    assert!(client.list(InventoryFilter::default()).await.unwrap().is_empty());
}
