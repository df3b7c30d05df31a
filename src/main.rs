use chrono::{Days, Utc};
use shelflife_inventory::lifecycle::{setup_tracing, InventorySystem, SystemConfig};
use shelflife_inventory::model::{Category, InventoryFilter, ItemDraft};
use shelflife_inventory::notify::LogDispatcher;
use shelflife_inventory::storage::FileStore;
use std::sync::Arc;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting inventory demo");

    let data_dir = std::env::temp_dir().join("shelflife-demo");
    let system = InventorySystem::start(
        Arc::new(FileStore::new(&data_dir)),
        Arc::new(LogDispatcher::new()),
        SystemConfig::default(),
    );

    let today = Utc::now().date_naive();

    let span = tracing::info_span!("restock");
    let milk_id = async {
        info!("Adding groceries from today's shop");
        let mut milk = ItemDraft::new("Milk", Category::Dairy, today + Days::new(1));
        milk.price = Some(2.49);
        milk.unit = Some("liters".to_string());
        let milk_id = system
            .inventory
            .add_item(milk)
            .await
            .map_err(|e| e.to_string())?;

        let mut rice = ItemDraft::new("Basmati rice", Category::Pantry, today + Days::new(30));
        rice.quantity = Some(2.0);
        rice.unit = Some("kg".to_string());
        system
            .inventory
            .add_item(rice)
            .await
            .map_err(|e| e.to_string())?;

        Ok::<_, String>(milk_id)
    }
    .instrument(span)
    .await?;

    let items = system
        .inventory
        .list(InventoryFilter::default())
        .await
        .map_err(|e| e.to_string())?;
    info!(count = items.len(), "Current inventory");

    let alerts = system
        .inventory
        .expiry_alerts()
        .await
        .map_err(|e| e.to_string())?;
    for alert in &alerts {
        info!(
            name = %alert.name,
            days = alert.days_until_expiry,
            urgency = ?alert.urgency,
            actions = ?alert.suggested_actions,
            "Expiry alert"
        );
    }

    let span = tracing::info_span!("consume");
    async {
        info!("Using up the milk");
        system
            .inventory
            .mark_used(milk_id, Some("made porridge".to_string()))
            .await
            .map_err(|e| e.to_string())?;
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    let stats = system.inventory.stats().await.map_err(|e| e.to_string())?;
    info!(
        total = stats.total,
        fresh = stats.fresh,
        nearing = stats.nearing,
        expired = stats.expired,
        saved_this_month = stats.waste_prevention.item_count,
        "Inventory stats"
    );

    system.shutdown().await?;

    info!("Demo completed");
    Ok(())
}
