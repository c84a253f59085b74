use serde::{Deserialize, Serialize};

use crate::rule::RuleCategory;

/// One evaluation request from the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub patient_id: String,
    #[serde(default)]
    pub encounter_id: Option<String>,
    /// What prompted the evaluation (order entry, result posting, chart open).
    pub trigger: String,
    /// When present, only rules in these categories are evaluated.
    #[serde(default)]
    pub scope: Option<Vec<RuleCategory>>,
    /// Rule ids the caller wants skipped for this request.
    #[serde(default)]
    pub exclude_rules: Vec<String>,
}

impl EvaluationRequest {
    pub fn new(patient_id: impl Into<String>, trigger: impl Into<String>) -> Self {
        Self {
            patient_id: patient_id.into(),
            encounter_id: None,
            trigger: trigger.into(),
            scope: None,
            exclude_rules: Vec::new(),
        }
    }

    pub fn with_scope(mut self, scope: Vec<RuleCategory>) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn with_exclusions(mut self, exclude_rules: Vec<String>) -> Self {
        self.exclude_rules = exclude_rules;
        self
    }
}
