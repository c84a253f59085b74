//! Per-category suppression filter.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use vigil_core::models::{Alert, SuppressionRule};
use vigil_core::rule::RuleCategory;
use vigil_core::traits::{IAlertHistory, ISuppressor};

use crate::similarity::alert_similarity;

const DAY_SECS: u64 = 86_400;

/// Built-in suppression policies, used when the caller configures none.
pub fn default_rules() -> Vec<SuppressionRule> {
    vec![
        SuppressionRule {
            category: RuleCategory::DrugInteraction,
            window_secs: DAY_SECS,
            max_occurrences: 3,
            similarity_threshold: 0.8,
            enabled: true,
        },
        SuppressionRule {
            category: RuleCategory::LabMonitoring,
            window_secs: 12 * 3600,
            max_occurrences: 2,
            similarity_threshold: 0.7,
            enabled: true,
        },
    ]
}

/// Drops duplicate/fatiguing alerts by counting sufficiently similar history
/// entries within the category's time window.
pub struct SuppressionFilter {
    rules: HashMap<RuleCategory, SuppressionRule>,
    history: Arc<dyn IAlertHistory>,
}

impl SuppressionFilter {
    pub fn new(rules: Vec<SuppressionRule>, history: Arc<dyn IAlertHistory>) -> Self {
        Self {
            rules: rules.into_iter().map(|r| (r.category, r)).collect(),
            history,
        }
    }

    /// Filter with the built-in default policies.
    pub fn with_defaults(history: Arc<dyn IAlertHistory>) -> Self {
        Self::new(default_rules(), history)
    }

    pub fn rule_for(&self, category: RuleCategory) -> Option<&SuppressionRule> {
        self.rules.get(&category)
    }
}

impl ISuppressor for SuppressionFilter {
    fn should_suppress(&self, alert: &Alert, patient_id: &str, now: DateTime<Utc>) -> bool {
        let Some(rule) = self.rules.get(&alert.category) else {
            return false;
        };
        if !rule.enabled {
            return false;
        }

        let window_start = now - rule.window();
        let similar = self
            .history
            .history_for(patient_id)
            .iter()
            .filter(|entry| entry.triggered_at >= window_start)
            .filter(|entry| alert_similarity(alert, entry) >= rule.similarity_threshold)
            .count();

        let suppress = similar >= rule.max_occurrences as usize;
        if suppress {
            debug!(
                rule = %alert.rule_id,
                category = %alert.category,
                similar,
                max = rule.max_occurrences,
                "alert suppressed as duplicate"
            );
        }
        suppress
    }
}
