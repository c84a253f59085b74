use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::rule::RuleCategory;

/// Per-category suppression policy: how many sufficiently similar alerts may
/// reach the patient's record within a time window before the next one is
/// dropped as fatiguing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuppressionRule {
    pub category: RuleCategory,
    /// Sliding window length in seconds.
    pub window_secs: u64,
    /// Similar occurrences allowed within the window.
    pub max_occurrences: u32,
    /// Minimum similarity (0–1) for a history entry to count.
    pub similarity_threshold: f64,
    #[serde(default = "enabled_default")]
    pub enabled: bool,
}

fn enabled_default() -> bool {
    true
}

impl SuppressionRule {
    pub fn window(&self) -> Duration {
        Duration::seconds(self.window_secs as i64)
    }
}
