//! Aggregate snapshots: inventory counts and the monthly waste rollup.

use crate::model::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Running monthly total of waste-prevention credit.
///
/// Persisted under its own key, separate from the item collection. Counters
/// reset when a credit lands in a different calendar month than `last_updated`
/// (a simple rollover, not a sliding window).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteRollup {
    pub item_count: u32,
    pub estimated_value: f64,
    pub co2_saved: f64,
    /// Month index, 0-11.
    pub last_updated: u32,
}

impl WasteRollup {
    pub fn empty(month: u32) -> Self {
        Self {
            item_count: 0,
            estimated_value: 0.0,
            co2_saved: 0.0,
            last_updated: month,
        }
    }
}

/// Read-only aggregate over the live collection plus the persisted rollup.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total: usize,
    pub fresh: usize,
    pub nearing: usize,
    pub expired: usize,
    /// Zero-filled across all ten categories.
    pub by_category: BTreeMap<Category, usize>,
    pub waste_prevention: WasteRollup,
}

impl InventoryStats {
    /// A category map with every category present at zero.
    pub fn zeroed_categories() -> BTreeMap<Category, usize> {
        Category::ALL.iter().map(|c| (*c, 0)).collect()
    }
}
