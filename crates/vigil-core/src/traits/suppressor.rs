use chrono::{DateTime, Utc};

use crate::models::Alert;

/// Duplicate/fatigue filtering over a patient's recent alert history.
pub trait ISuppressor: Send + Sync {
    /// Whether a candidate alert should be dropped instead of shown.
    fn should_suppress(&self, alert: &Alert, patient_id: &str, now: DateTime<Utc>) -> bool;
}
