//! Dashboard filter state shared across screens.

use serde::Deserialize;
use serde::Serialize;
use tokio::sync::watch;

/// Filters applied to dashboard reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardFilters {
    /// Selected KVK id.
    pub selected_kvk: Option<String>,
    /// Financial year, e.g. `2024-25`.
    pub financial_year: Option<String>,
    /// Selected zone id.
    pub zone: Option<String>,
}

impl DashboardFilters {
    /// Returns `true` if no filter is set.
    pub fn is_empty(&self) -> bool {
        self.selected_kvk.is_none() && self.financial_year.is_none() && self.zone.is_none()
    }
}

/// Shared handle to the dashboard filters.
///
/// Cheap to clone. Screens that render filtered data can [`subscribe`](Self::subscribe)
/// to be woken on every change.
#[derive(Debug, Clone)]
pub struct DashboardStore {
    tx: watch::Sender<DashboardFilters>,
}

impl DashboardStore {
    /// Creates a store with empty filters.
    pub fn new() -> Self {
        Self::with_filters(DashboardFilters::default())
    }

    /// Creates a store with the given filters.
    pub fn with_filters(filters: DashboardFilters) -> Self {
        let (tx, _) = watch::channel(filters);
        Self { tx }
    }

    /// Returns a copy of the current filters.
    pub fn get(&self) -> DashboardFilters {
        self.tx.borrow().clone()
    }

    /// Modifies the filters in place and notifies subscribers.
    pub fn update(&self, f: impl FnOnce(&mut DashboardFilters)) {
        self.tx.send_modify(f);
    }

    /// Clears all filters.
    pub fn reset(&self) {
        self.tx.send_replace(DashboardFilters::default());
    }

    /// Returns a receiver that observes every change.
    pub fn subscribe(&self) -> watch::Receiver<DashboardFilters> {
        self.tx.subscribe()
    }
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_and_reset() {
        let store = DashboardStore::new();
        let other = store.clone();
        assert!(store.get().is_empty());

        other.update(|f| {
            f.financial_year = Some("2024-25".into());
            f.zone = Some("zone-3".into());
        });
        assert_eq!(store.get().financial_year.as_deref(), Some("2024-25"));

        store.reset();
        assert!(other.get().is_empty());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = DashboardStore::new();
        let mut rx = store.subscribe();
        store.update(|f| f.selected_kvk = Some("kvk-12".into()));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().selected_kvk.as_deref(), Some("kvk-12"));
    }
}
