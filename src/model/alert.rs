//! Expiry alerts derived from the live collection.

use crate::model::ItemId;
use serde::Serialize;

/// Alert severity, derived from days-until-expiry alone.
///
/// Independent of [`ItemStatus`](crate::model::ItemStatus): an item can be
/// `Nearing` while its alert is `High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Expired,
    High,
    Medium,
    Low,
}

impl Urgency {
    /// Sort rank; lower is more urgent.
    pub fn rank(self) -> u8 {
        match self {
            Urgency::Expired => 0,
            Urgency::High => 1,
            Urgency::Medium => 2,
            Urgency::Low => 3,
        }
    }
}

/// An ephemeral, derived alert for one item. Never persisted; recomputed on
/// every query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryAlert {
    pub item_id: ItemId,
    pub name: String,
    /// Ceiling of (expiry - now) in whole days; negative once expired.
    pub days_until_expiry: i64,
    pub urgency: Urgency,
    pub suggested_actions: Vec<String>,
}
