use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::priority::PriorityScore;
use crate::rule::{EvidenceLevel, Rule, RuleCategory, Severity};

/// Alert lifecycle state. `Active` on creation; the four terminal states are
/// mutually exclusive and entered by the caller, never by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Active,
    Acknowledged,
    Overridden,
    Dismissed,
    Expired,
}

impl AlertStatus {
    pub fn is_terminal(self) -> bool {
        self != Self::Active
    }
}

/// Evidence payload carried by a fired alert: the source rule's version and
/// evidence level plus clinical facts extracted from the context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertEvidence {
    pub rule_version: String,
    pub level: EvidenceLevel,
    #[serde(default)]
    pub references: Vec<String>,
    /// Extracted clinical facts, keyed by fact name.
    #[serde(default)]
    pub facts: BTreeMap<String, String>,
}

/// The result of a fired rule, scored and ranked for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// UUID v4 identifier.
    pub id: String,
    pub rule_id: String,
    pub rule_name: String,
    pub category: RuleCategory,
    pub severity: Severity,
    pub message: String,
    pub recommendation: Option<String>,
    pub alternatives: Vec<String>,
    pub requires_override: bool,
    pub escalation: Option<u8>,
    pub evidence: AlertEvidence,
    pub status: AlertStatus,
    pub created_at: DateTime<Utc>,
    pub triggered_at: DateTime<Utc>,
    /// When a terminal state was entered, if any.
    pub resolved_at: Option<DateTime<Utc>>,
    /// Set by the priority scorer after suppression filtering.
    pub priority: Option<PriorityScore>,
}

impl Alert {
    /// Build an `Active` alert from a fired rule.
    pub fn from_rule(rule: &Rule, facts: BTreeMap<String, String>, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            rule_id: rule.id.clone(),
            rule_name: rule.name.clone(),
            category: rule.category,
            severity: rule.severity,
            message: rule.actions.message.clone(),
            recommendation: rule.actions.recommendation.clone(),
            alternatives: rule.actions.alternatives.clone(),
            requires_override: rule.actions.requires_override,
            escalation: rule.actions.escalation,
            evidence: AlertEvidence {
                rule_version: rule.evidence.version.clone(),
                level: rule.evidence.level,
                references: rule.evidence.references.clone(),
                facts,
            },
            status: AlertStatus::Active,
            created_at: now,
            triggered_at: now,
            resolved_at: None,
            priority: None,
        }
    }

    /// Move an active alert into a terminal state. Returns false (and leaves
    /// the alert untouched) if it is already terminal or the target is not.
    pub fn resolve(&mut self, status: AlertStatus, at: DateTime<Utc>) -> bool {
        if self.status.is_terminal() || !status.is_terminal() {
            return false;
        }
        self.status = status;
        self.resolved_at = Some(at);
        true
    }

    /// The capped priority total, or zero if not yet scored.
    pub fn priority_total(&self) -> u32 {
        self.priority.map(|p| p.total).unwrap_or(0)
    }
}

/// Identity equality: two alerts are equal if they have the same ID.
/// A fired alert's identity is its UUID, not its content.
impl PartialEq for Alert {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{ActionSet, Evidence};

    fn sample_rule() -> Rule {
        Rule {
            id: "ddi-001".into(),
            name: "Warfarin + NSAID".into(),
            category: RuleCategory::DrugInteraction,
            severity: Severity::Severe,
            conditions: vec![],
            actions: ActionSet {
                message: "Bleeding risk".into(),
                recommendation: Some("Consider paracetamol".into()),
                alternatives: vec!["paracetamol".into()],
                requires_override: true,
                escalation: None,
            },
            evidence: Evidence {
                level: EvidenceLevel::A,
                references: vec![],
                version: "2".into(),
            },
            enabled: true,
        }
    }

    #[test]
    fn from_rule_copies_actions_and_evidence() {
        let alert = Alert::from_rule(&sample_rule(), BTreeMap::new(), Utc::now());
        assert_eq!(alert.status, AlertStatus::Active);
        assert_eq!(alert.message, "Bleeding risk");
        assert_eq!(alert.evidence.level, EvidenceLevel::A);
        assert_eq!(alert.evidence.rule_version, "2");
        assert!(alert.requires_override);
    }

    #[test]
    fn terminal_states_are_mutually_exclusive() {
        let mut alert = Alert::from_rule(&sample_rule(), BTreeMap::new(), Utc::now());
        assert!(alert.resolve(AlertStatus::Overridden, Utc::now()));
        assert!(!alert.resolve(AlertStatus::Dismissed, Utc::now()));
        assert_eq!(alert.status, AlertStatus::Overridden);
    }

    #[test]
    fn resolve_rejects_non_terminal_target() {
        let mut alert = Alert::from_rule(&sample_rule(), BTreeMap::new(), Utc::now());
        assert!(!alert.resolve(AlertStatus::Active, Utc::now()));
        assert_eq!(alert.status, AlertStatus::Active);
    }
}
