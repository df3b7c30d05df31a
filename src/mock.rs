//! # Test Doubles
//!
//! In-process doubles for the two collaborator seams, usable from unit and
//! integration tests alike (hence a regular module, not `#[cfg(test)]`).
//!
//! - [`RecordingDispatcher`] captures every notification call so tests can
//!   assert on scheduling, cancellation and milestone behavior, and can be
//!   switched into a failing mode to verify that dispatcher errors never
//!   propagate out of inventory operations.
//! - [`FlakyStore`] wraps a [`MemoryStore`] and injects read/write failures
//!   on demand, for exercising the degraded-storage paths (load falls back to
//!   empty, persist failures leave memory authoritative).

use crate::notify::{
    ExpiryReminder, LocalNotification, NotificationDispatcher, NotifyError, WastePrevented,
};
use crate::storage::{KeyValueStore, MemoryStore, StoreError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

/// Records every dispatcher call; optionally fails them all.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    next_id: AtomicU64,
    failing: AtomicBool,
    scheduled: Mutex<Vec<ExpiryReminder>>,
    cancelled: Mutex<Vec<String>>,
    sent: Mutex<Vec<LocalNotification>>,
    milestones: Mutex<Vec<WastePrevented>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// When failing, every call returns [`NotifyError::Delivery`] and records
    /// nothing.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn scheduled(&self) -> Vec<ExpiryReminder> {
        self.scheduled.lock().expect("dispatcher lock").clone()
    }

    pub fn cancelled(&self) -> Vec<String> {
        self.cancelled.lock().expect("dispatcher lock").clone()
    }

    pub fn sent(&self) -> Vec<LocalNotification> {
        self.sent.lock().expect("dispatcher lock").clone()
    }

    pub fn milestones(&self) -> Vec<WastePrevented> {
        self.milestones.lock().expect("dispatcher lock").clone()
    }

    fn check(&self) -> Result<(), NotifyError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(NotifyError::Delivery("injected failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl NotificationDispatcher for RecordingDispatcher {
    async fn schedule_expiry_reminder(
        &self,
        reminder: &ExpiryReminder,
    ) -> Result<Option<String>, NotifyError> {
        self.check()?;
        let id = format!("mock-{}", self.next_id.fetch_add(1, Ordering::Relaxed));
        self.scheduled
            .lock()
            .expect("dispatcher lock")
            .push(reminder.clone());
        Ok(Some(id))
    }

    async fn cancel_notification(&self, notification_id: &str) -> Result<(), NotifyError> {
        self.check()?;
        self.cancelled
            .lock()
            .expect("dispatcher lock")
            .push(notification_id.to_string());
        Ok(())
    }

    async fn send_local_notification(&self, note: &LocalNotification) -> Result<(), NotifyError> {
        self.check()?;
        self.sent.lock().expect("dispatcher lock").push(note.clone());
        Ok(())
    }

    async fn notify_waste_prevented(&self, summary: &WastePrevented) -> Result<(), NotifyError> {
        self.check()?;
        self.milestones
            .lock()
            .expect("dispatcher lock")
            .push(*summary);
        Ok(())
    }
}

/// A [`MemoryStore`] with switchable read/write failure injection.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, key: &str, value: &str) {
        self.inner.seed(key, value).await;
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Io(std::io::Error::other("injected read failure")));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Io(std::io::Error::other(
                "injected write failure",
            )));
        }
        self.inner.set(key, value).await
    }
}
