//! Notification dispatch seam.
//!
//! The actor treats every dispatcher call as best-effort: failures are logged
//! and discarded, never surfaced to the caller of the triggering operation.
//! The dispatcher is injected at startup alongside the storage backend.

pub mod log;

pub use log::LogDispatcher;

use crate::model::ItemId;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification delivery failed: {0}")]
    Delivery(String),
}

/// A reminder to schedule for the day before an item expires.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryReminder {
    pub item_id: ItemId,
    pub name: String,
    pub expires_on: NaiveDate,
}

/// An immediate local notification.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalNotification {
    pub title: String,
    pub body: String,
    pub data: serde_json::Value,
    pub sound: Option<String>,
}

/// Running waste-prevention totals for the celebratory notification.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WastePrevented {
    pub items_saved: u32,
    pub money_saved: f64,
    pub co2_saved_kg: f64,
}

/// Local reminder scheduling and immediate notification delivery.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Schedule a reminder; returns the platform notification id, or `None`
    /// when the platform declined to schedule one.
    async fn schedule_expiry_reminder(
        &self,
        reminder: &ExpiryReminder,
    ) -> Result<Option<String>, NotifyError>;

    async fn cancel_notification(&self, notification_id: &str) -> Result<(), NotifyError>;

    async fn send_local_notification(&self, note: &LocalNotification) -> Result<(), NotifyError>;

    async fn notify_waste_prevented(&self, summary: &WastePrevented) -> Result<(), NotifyError>;
}
