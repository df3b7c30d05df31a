use crate::clients::InventoryClient;
use crate::inventory::{InventoryActor, InventoryContext};
use crate::notify::NotificationDispatcher;
use crate::storage::KeyValueStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Tunables for [`InventorySystem::start`].
#[derive(Debug, Clone)]
pub struct SystemConfig {
    /// Capacity of the request channel.
    pub channel_capacity: usize,
    /// Interval between automatic reclassification passes. The startup pass
    /// runs regardless of this value.
    pub reclassify_every: Duration,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 32,
            reclassify_every: Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// Runtime orchestrator for the inventory tracker.
///
/// `InventorySystem` is responsible for:
/// - **Lifecycle**: starting the actor and the reclassification timer, and
///   shutting both down cleanly
/// - **Dependency wiring**: injecting the storage backend and notification
///   dispatcher chosen by the host application
///
/// Construct one per logical inventory; there is no process-wide instance.
/// Tests that want no timers at all can bypass this type and drive
/// [`InventoryActor`] directly.
///
/// # Example
///
/// ```ignore
/// let system = InventorySystem::start(store, notifier, SystemConfig::default());
/// let id = system.inventory.add_item(draft).await?;
/// system.shutdown().await?;
/// ```
pub struct InventorySystem {
    /// Client for the inventory actor.
    pub inventory: InventoryClient,

    actor_handle: tokio::task::JoinHandle<()>,
    timer_handle: tokio::task::JoinHandle<()>,
}

impl InventorySystem {
    /// Starts the actor (which loads persisted state and runs one
    /// reclassification pass) and arms the recurring timer.
    pub fn start(
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn NotificationDispatcher>,
        config: SystemConfig,
    ) -> Self {
        let (actor, inventory) = InventoryActor::new(config.channel_capacity);
        let actor_handle = tokio::spawn(actor.run(InventoryContext { store, notifier }));

        // The timer holds its own client clone; it is aborted on shutdown so
        // its clone cannot keep the actor's channel open.
        let timer_client = inventory.clone();
        let every = config.reclassify_every;
        let timer_handle = tokio::spawn(async move {
            let mut ticks = tokio::time::interval(every);
            ticks.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick fires immediately; the actor already ran its
            // startup pass, so skip it.
            ticks.tick().await;
            loop {
                ticks.tick().await;
                match timer_client.reclassify().await {
                    Ok(outcome) => {
                        info!(
                            reviewed = outcome.reviewed,
                            changed = outcome.changed,
                            urgent = outcome.urgent,
                            "Scheduled reclassification pass"
                        );
                    }
                    Err(error) => {
                        warn!(%error, "Reclassification pass failed; stopping timer");
                        break;
                    }
                }
            }
        });

        Self {
            inventory,
            actor_handle,
            timer_handle,
        }
    }

    /// Gracefully shuts down: stops the timer, closes the request channel by
    /// dropping the client, then waits for the actor to drain and exit.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down inventory system...");

        self.timer_handle.abort();
        let _ = self.timer_handle.await;

        // Dropping the last client closes the channel; the actor's recv loop
        // returns None and the task finishes.
        drop(self.inventory);

        if let Err(e) = self.actor_handle.await {
            error!("Inventory actor task failed: {:?}", e);
            return Err(format!("Inventory actor task failed: {e:?}"));
        }

        info!("Inventory system shutdown complete.");
        Ok(())
    }
}
