//! Pure date arithmetic and classification rules.
//!
//! Everything here is a function of its arguments, so the rules can be tested
//! with pinned instants instead of timers or a mocked clock. The actor passes
//! `Utc::now()` in; tests pass whatever they need.

use crate::model::{Category, ExpiryAlert, InventoryItem, ItemStatus, Urgency, WasteRollup};
use chrono::{DateTime, NaiveTime, Utc};

const SECONDS_PER_DAY: i64 = 86_400;

/// Ceiling of (expiry - now) in whole days.
///
/// The expiry date counts from its own midnight UTC, so an item expiring
/// "tomorrow" reads as 1 all day today, drops to 0 on the morning of the
/// expiry date, and goes negative the day after.
pub fn days_until(item: &InventoryItem, now: DateTime<Utc>) -> i64 {
    let expiry = item.expires_on.and_time(NaiveTime::MIN).and_utc();
    let secs = (expiry - now).num_seconds();
    secs.div_euclid(SECONDS_PER_DAY) + i64::from(secs.rem_euclid(SECONDS_PER_DAY) > 0)
}

/// The automatic status for a non-terminal item: negative days means expired,
/// two or fewer means nearing, anything else is fresh.
///
/// Callers must not apply this to items already in a terminal status; those
/// transitions are permanent.
pub fn status_for(item: &InventoryItem, now: DateTime<Utc>) -> ItemStatus {
    let days = days_until(item, now);
    if days < 0 {
        ItemStatus::Expired
    } else if days <= 2 {
        ItemStatus::Nearing
    } else {
        ItemStatus::Fresh
    }
}

fn suggested_actions(days: i64) -> &'static [&'static str] {
    if days < 0 {
        &["Discard safely", "Check if still usable"]
    } else if days == 0 {
        &["Use immediately", "Cook and freeze", "Share in marketplace"]
    } else if days == 1 {
        &["Use tomorrow", "Share in marketplace", "Prepare meal"]
    } else if days <= 3 {
        &["Plan meals", "Share in marketplace", "Freeze if possible"]
    } else {
        &["Include in meal planning"]
    }
}

/// Build the alert for one item, if it warrants one.
///
/// Terminal items never alert, and neither does anything more than a week out.
pub fn alert_for(item: &InventoryItem, now: DateTime<Utc>) -> Option<ExpiryAlert> {
    if item.status.is_terminal() {
        return None;
    }
    let days = days_until(item, now);
    if days > 7 {
        return None;
    }
    let urgency = if days < 0 {
        Urgency::Expired
    } else if days <= 1 {
        Urgency::High
    } else if days <= 3 {
        Urgency::Medium
    } else {
        Urgency::Low
    };
    Some(ExpiryAlert {
        item_id: item.id,
        name: item.name.clone(),
        days_until_expiry: days,
        urgency,
        suggested_actions: suggested_actions(days)
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
    })
}

/// Sort alerts by urgency rank, then soonest expiry first.
pub fn sort_alerts(alerts: &mut [ExpiryAlert]) {
    alerts.sort_by_key(|a| (a.urgency.rank(), a.days_until_expiry));
}

/// Credit one resolved item against the monthly rollup.
///
/// A credit landing in a different calendar month than the rollup's
/// `last_updated` resets the counters first.
pub fn credit_rollup(rollup: &mut WasteRollup, price: f64, category: Category, month: u32) {
    if rollup.last_updated != month {
        *rollup = WasteRollup::empty(month);
    }
    rollup.item_count += 1;
    rollup.estimated_value += price;
    rollup.co2_saved += category.co2_estimate_kg();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemDraft, ItemId, StorageLocation};
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
            .and_utc()
    }

    fn item_expiring(y: i32, m: u32, d: u32) -> InventoryItem {
        let expires_on = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let draft = ItemDraft::new("Milk", Category::Dairy, expires_on);
        InventoryItem {
            id: ItemId::generate(),
            name: draft.name,
            original_name: None,
            category: draft.category,
            quantity: 1.0,
            unit: "pieces".to_string(),
            price: 0.0,
            expires_on,
            location: StorageLocation::Fridge,
            notes: None,
            photos: Vec::new(),
            shared_in_marketplace: false,
            notification_ids: Vec::new(),
            status: ItemStatus::Fresh,
            added_at: Utc::now(),
            updated_at: Utc::now(),
            consumed_at: None,
        }
    }

    #[test]
    fn days_until_rounds_up() {
        let noon = at(2026, 6, 10, 12);

        // Tomorrow midnight is half a day away: still one whole day.
        assert_eq!(days_until(&item_expiring(2026, 6, 11), noon), 1);
        // Expiring today reads as zero all day.
        assert_eq!(days_until(&item_expiring(2026, 6, 10), noon), 0);
        // Yesterday is already negative.
        assert_eq!(days_until(&item_expiring(2026, 6, 9), noon), -1);
        assert_eq!(days_until(&item_expiring(2026, 6, 5), noon), -5);
        assert_eq!(days_until(&item_expiring(2026, 6, 17), noon), 7);
        assert_eq!(days_until(&item_expiring(2026, 7, 10), noon), 30);
    }

    #[test]
    fn status_thresholds() {
        let noon = at(2026, 6, 10, 12);

        assert_eq!(status_for(&item_expiring(2026, 6, 9), noon), ItemStatus::Expired);
        assert_eq!(status_for(&item_expiring(2026, 6, 10), noon), ItemStatus::Nearing);
        assert_eq!(status_for(&item_expiring(2026, 6, 11), noon), ItemStatus::Nearing);
        assert_eq!(status_for(&item_expiring(2026, 6, 12), noon), ItemStatus::Nearing);
        assert_eq!(status_for(&item_expiring(2026, 6, 13), noon), ItemStatus::Fresh);
        assert_eq!(status_for(&item_expiring(2026, 7, 10), noon), ItemStatus::Fresh);
    }

    #[test]
    fn alert_table_first_match() {
        let noon = at(2026, 6, 10, 12);

        let expired = alert_for(&item_expiring(2026, 6, 5), noon).unwrap();
        assert_eq!(expired.urgency, Urgency::Expired);
        assert_eq!(
            expired.suggested_actions,
            vec!["Discard safely", "Check if still usable"]
        );

        let today = alert_for(&item_expiring(2026, 6, 10), noon).unwrap();
        assert_eq!(today.urgency, Urgency::High);
        assert_eq!(
            today.suggested_actions,
            vec!["Use immediately", "Cook and freeze", "Share in marketplace"]
        );

        let tomorrow = alert_for(&item_expiring(2026, 6, 11), noon).unwrap();
        assert_eq!(tomorrow.urgency, Urgency::High);
        assert_eq!(
            tomorrow.suggested_actions,
            vec!["Use tomorrow", "Share in marketplace", "Prepare meal"]
        );

        let in_three = alert_for(&item_expiring(2026, 6, 13), noon).unwrap();
        assert_eq!(in_three.urgency, Urgency::Medium);
        assert_eq!(
            in_three.suggested_actions,
            vec!["Plan meals", "Share in marketplace", "Freeze if possible"]
        );

        let in_week = alert_for(&item_expiring(2026, 6, 17), noon).unwrap();
        assert_eq!(in_week.urgency, Urgency::Low);
        assert_eq!(in_week.suggested_actions, vec!["Include in meal planning"]);

        assert!(alert_for(&item_expiring(2026, 6, 18), noon).is_none());
    }

    #[test]
    fn terminal_items_never_alert() {
        let noon = at(2026, 6, 10, 12);
        let mut item = item_expiring(2026, 6, 5);
        item.status = ItemStatus::Used;
        assert!(alert_for(&item, noon).is_none());
        item.status = ItemStatus::Donated;
        assert!(alert_for(&item, noon).is_none());
        item.status = ItemStatus::Sold;
        assert!(alert_for(&item, noon).is_none());
    }

    #[test]
    fn alerts_sort_by_urgency_then_days() {
        let noon = at(2026, 6, 10, 12);
        let mut alerts: Vec<ExpiryAlert> = [
            item_expiring(2026, 6, 16), // low, 6 days
            item_expiring(2026, 6, 11), // high, 1 day
            item_expiring(2026, 6, 8),  // expired, -2
            item_expiring(2026, 6, 13), // medium, 3 days
            item_expiring(2026, 6, 10), // high, 0 days
            item_expiring(2026, 6, 3),  // expired, -7
        ]
        .iter()
        .filter_map(|i| alert_for(i, noon))
        .collect();

        sort_alerts(&mut alerts);

        let days: Vec<i64> = alerts.iter().map(|a| a.days_until_expiry).collect();
        assert_eq!(days, vec![-7, -2, 0, 1, 3, 6]);
        assert_eq!(alerts[0].urgency, Urgency::Expired);
        assert_eq!(alerts[2].urgency, Urgency::High);
        assert_eq!(alerts[4].urgency, Urgency::Medium);
        assert_eq!(alerts[5].urgency, Urgency::Low);
    }

    #[test]
    fn rollup_accumulates_within_month() {
        let mut rollup = WasteRollup::empty(5);
        credit_rollup(&mut rollup, 3.5, Category::Dairy, 5);
        credit_rollup(&mut rollup, 10.0, Category::Meat, 5);

        assert_eq!(rollup.item_count, 2);
        assert!((rollup.estimated_value - 13.5).abs() < f64::EPSILON);
        assert!((rollup.co2_saved - 18.0).abs() < f64::EPSILON);
        assert_eq!(rollup.last_updated, 5);
    }

    #[test]
    fn rollup_resets_on_month_change() {
        let mut rollup = WasteRollup {
            item_count: 9,
            estimated_value: 42.0,
            co2_saved: 12.0,
            last_updated: 4,
        };
        credit_rollup(&mut rollup, 2.0, Category::Vegetables, 5);

        assert_eq!(rollup.item_count, 1);
        assert!((rollup.estimated_value - 2.0).abs() < f64::EPSILON);
        assert!((rollup.co2_saved - 0.3).abs() < f64::EPSILON);
        assert_eq!(rollup.last_updated, 5);
    }

    #[test]
    fn co2_table_spot_checks() {
        assert!((Category::Meat.co2_estimate_kg() - 15.0).abs() < f64::EPSILON);
        assert!((Category::Beverages.co2_estimate_kg() - 0.7).abs() < f64::EPSILON);
        assert!((Category::Vegetables.co2_estimate_kg() - 0.3).abs() < f64::EPSILON);
        assert!((Category::Other.co2_estimate_kg() - 1.0).abs() < f64::EPSILON);
    }
}
