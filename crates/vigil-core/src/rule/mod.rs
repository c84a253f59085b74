pub mod condition;

pub use condition::{
    Comparator, ComparisonValue, Condition, LogicOp, Predicate, Timeframe, TimeUnit, VitalSign,
};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Clinical category a rule belongs to. Drives impact scoring and
/// per-category suppression windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    DrugInteraction,
    DrugAllergy,
    Contraindication,
    LabMonitoring,
    DoseCheck,
    QualityMeasure,
    /// Unrecognized category — rejected at catalog load.
    #[serde(other)]
    Unknown,
}

impl RuleCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DrugInteraction => "drug_interaction",
            Self::DrugAllergy => "drug_allergy",
            Self::Contraindication => "contraindication",
            Self::LabMonitoring => "lab_monitoring",
            Self::DoseCheck => "dose_check",
            Self::QualityMeasure => "quality_measure",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity tier assigned by the rule author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Severe,
    Moderate,
    Low,
    Info,
    /// Unrecognized tier — scored at the default severity weight.
    #[serde(other)]
    Unknown,
}

/// A–D grading of the clinical evidence backing a rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EvidenceLevel {
    A,
    B,
    C,
    D,
    #[default]
    #[serde(other)]
    Unrated,
}

/// Evidence metadata carried by a rule and copied onto fired alerts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Evidence {
    pub level: EvidenceLevel,
    pub references: Vec<String>,
    pub version: String,
}

/// What the caller should show and offer when a rule fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSet {
    pub message: String,
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default)]
    pub alternatives: Vec<String>,
    #[serde(default)]
    pub requires_override: bool,
    /// Escalation level; `Some` means the alert escalates.
    #[serde(default)]
    pub escalation: Option<u8>,
}

/// A named, versioned clinical check. Immutable once loaded into the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub name: String,
    pub category: RuleCategory,
    pub severity: Severity,
    /// Ordered condition list, combined left-to-right by each condition's
    /// own logical operator.
    pub conditions: Vec<Condition>,
    pub actions: ActionSet,
    #[serde(default)]
    pub evidence: Evidence,
    #[serde(default = "enabled_default")]
    pub enabled: bool,
}

fn enabled_default() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_category_maps_to_unknown() {
        let cat: RuleCategory = serde_json::from_str("\"genomic_screening\"").unwrap();
        assert_eq!(cat, RuleCategory::Unknown);
    }

    #[test]
    fn evidence_level_parses_letter_grades() {
        let level: EvidenceLevel = serde_json::from_str("\"A\"").unwrap();
        assert_eq!(level, EvidenceLevel::A);
        let level: EvidenceLevel = serde_json::from_str("\"expert-opinion\"").unwrap();
        assert_eq!(level, EvidenceLevel::Unrated);
    }

    #[test]
    fn rule_enabled_defaults_to_true() {
        let rule: Rule = serde_json::from_value(serde_json::json!({
            "id": "r-1",
            "name": "Potassium monitoring",
            "category": "lab_monitoring",
            "severity": "moderate",
            "conditions": [],
            "actions": { "message": "Check potassium" }
        }))
        .unwrap();
        assert!(rule.enabled);
        assert_eq!(rule.evidence.level, EvidenceLevel::Unrated);
    }
}
