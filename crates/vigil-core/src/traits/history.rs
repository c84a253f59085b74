use crate::models::Alert;

/// Per-patient rolling window of previously fired alerts.
pub trait IAlertHistory: Send + Sync {
    /// Append newly fired (non-suppressed) alerts to the patient's history,
    /// then prune entries older than the retention horizon.
    fn record_fired(&self, patient_id: &str, alerts: &[Alert]);

    /// The patient's current history. Always pruned; entries past the
    /// retention horizon are never returned.
    fn history_for(&self, patient_id: &str) -> Vec<Alert>;
}
