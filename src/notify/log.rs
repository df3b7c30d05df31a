//! Structured-log delivery: records every notification instead of handing it
//! to a push provider. Stands in wherever no platform notification channel is
//! wired up, which is also how the hosted notification service behaves today.

use crate::notify::{
    ExpiryReminder, LocalNotification, NotificationDispatcher, NotifyError, WastePrevented,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

#[derive(Debug, Default)]
pub struct LogDispatcher {
    next_id: AtomicU64,
}

impl LogDispatcher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationDispatcher for LogDispatcher {
    async fn schedule_expiry_reminder(
        &self,
        reminder: &ExpiryReminder,
    ) -> Result<Option<String>, NotifyError> {
        let id = format!("local-{}", self.next_id.fetch_add(1, Ordering::Relaxed));
        info!(
            notification_id = %id,
            item_id = %reminder.item_id,
            name = %reminder.name,
            expires_on = %reminder.expires_on,
            "Expiry reminder scheduled"
        );
        Ok(Some(id))
    }

    async fn cancel_notification(&self, notification_id: &str) -> Result<(), NotifyError> {
        info!(notification_id, "Notification cancelled");
        Ok(())
    }

    async fn send_local_notification(&self, note: &LocalNotification) -> Result<(), NotifyError> {
        info!(title = %note.title, body = %note.body, data = %note.data, "Local notification");
        Ok(())
    }

    async fn notify_waste_prevented(&self, summary: &WastePrevented) -> Result<(), NotifyError> {
        info!(
            items_saved = summary.items_saved,
            money_saved = summary.money_saved,
            co2_saved_kg = summary.co2_saved_kg,
            "Waste prevention milestone"
        );
        Ok(())
    }
}
