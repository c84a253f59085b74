use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::alert::Alert;

/// A derived suggestion: one per alternative listed in an alert's actions,
/// carrying the alert's priority as its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub alert_id: String,
    pub rule_id: String,
    pub text: String,
    pub priority: u32,
}

/// One rule whose evaluation failed. The rule was treated as "did not fire";
/// the failure is surfaced here so callers can tell the two apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDiagnostic {
    pub rule_id: String,
    pub detail: String,
}

/// The ranked outcome of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub patient_id: String,
    pub encounter_id: Option<String>,
    /// Fired, non-suppressed alerts, sorted by priority descending.
    pub alerts: Vec<Alert>,
    pub suggestions: Vec<Suggestion>,
    pub rules_evaluated: usize,
    pub rules_fired: usize,
    /// Rules whose evaluation failed and were treated as not fired.
    pub diagnostics: Vec<RuleDiagnostic>,
    pub latency_ms: f64,
    pub evaluated_at: DateTime<Utc>,
}
