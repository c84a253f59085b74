//! Per-patient alert history — concurrent access via DashMap.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

use vigil_core::constants::HISTORY_RETENTION_DAYS;
use vigil_core::models::Alert;
use vigil_core::traits::IAlertHistory;

/// Rolling per-patient window of previously fired alerts. Entries leave only
/// through age-based pruning at the retention horizon.
pub struct AlertHistoryStore {
    entries: DashMap<String, Vec<Alert>>,
    retention: Duration,
}

impl AlertHistoryStore {
    /// Create a store with the default 30-day retention horizon.
    pub fn new() -> Self {
        Self::with_retention_days(HISTORY_RETENTION_DAYS)
    }

    pub fn with_retention_days(days: i64) -> Self {
        Self {
            entries: DashMap::new(),
            retention: Duration::days(days),
        }
    }

    /// Number of patients with at least one retained alert.
    pub fn patient_count(&self) -> usize {
        self.entries.len()
    }

    fn horizon(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.retention
    }
}

impl IAlertHistory for AlertHistoryStore {
    fn record_fired(&self, patient_id: &str, alerts: &[Alert]) {
        if alerts.is_empty() {
            return;
        }
        let horizon = self.horizon(Utc::now());
        let mut entry = self.entries.entry(patient_id.to_string()).or_default();
        entry.extend(alerts.iter().cloned());
        entry.retain(|a| a.triggered_at >= horizon);
    }

    fn history_for(&self, patient_id: &str) -> Vec<Alert> {
        let horizon = self.horizon(Utc::now());
        self.entries
            .get(patient_id)
            .map(|list| {
                list.iter()
                    .filter(|a| a.triggered_at >= horizon)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for AlertHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}
