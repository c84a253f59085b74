//! Alert similarity: rule-id short-circuit (1.0), category gate (0.0),
//! token Jaccard otherwise. The asymmetric special-casing is a deliberate
//! tie-break and must hold in exactly this order.

use std::collections::HashSet;

use vigil_core::models::Alert;

/// Jaccard index of the lower-cased whitespace-tokenized messages.
/// Returns 0.0 when both token sets are empty.
pub fn jaccard(a: &str, b: &str) -> f64 {
    let tokens_a: HashSet<String> = tokenize(a);
    let tokens_b: HashSet<String> = tokenize(b);
    let union = tokens_a.union(&tokens_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = tokens_a.intersection(&tokens_b).count();
    intersection as f64 / union as f64
}

/// Similarity between a candidate alert and a history entry, in [0.0, 1.0].
pub fn alert_similarity(a: &Alert, b: &Alert) -> f64 {
    if a.rule_id == b.rule_id {
        return 1.0;
    }
    if a.category != b.category {
        return 0.0;
    }
    jaccard(&a.message, &b.message)
}

fn tokenize(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .map(|t| t.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use vigil_core::rule::{ActionSet, Rule, RuleCategory, Severity};

    fn alert(rule_id: &str, category: RuleCategory, message: &str) -> Alert {
        let rule = Rule {
            id: rule_id.into(),
            name: "test".into(),
            category,
            severity: Severity::Moderate,
            conditions: vec![],
            actions: ActionSet {
                message: message.into(),
                recommendation: None,
                alternatives: vec![],
                requires_override: false,
                escalation: None,
            },
            evidence: Default::default(),
            enabled: true,
        };
        Alert::from_rule(&rule, BTreeMap::new(), Utc::now())
    }

    #[test]
    fn same_rule_id_short_circuits_to_one() {
        let a = alert("r1", RuleCategory::DrugInteraction, "completely different");
        let b = alert("r1", RuleCategory::DrugInteraction, "message text here");
        assert_eq!(alert_similarity(&a, &b), 1.0);
    }

    #[test]
    fn different_categories_gate_to_zero() {
        // Identical messages, but the category gate wins.
        let a = alert("r1", RuleCategory::DrugInteraction, "check potassium");
        let b = alert("r2", RuleCategory::LabMonitoring, "check potassium");
        assert_eq!(alert_similarity(&a, &b), 0.0);
    }

    #[test]
    fn jaccard_over_lowercased_tokens() {
        // {check, serum, potassium} ∩ {check, potassium, level} = 2
        // union = 4 → 0.5
        let a = alert("r1", RuleCategory::LabMonitoring, "Check serum potassium");
        let b = alert("r2", RuleCategory::LabMonitoring, "check potassium level");
        assert_eq!(alert_similarity(&a, &b), 0.5);
    }

    #[test]
    fn identical_messages_score_one() {
        assert_eq!(jaccard("renal dosing review", "Renal  Dosing review"), 1.0);
    }

    #[test]
    fn empty_messages_score_zero() {
        assert_eq!(jaccard("", ""), 0.0);
        assert_eq!(jaccard("something", ""), 0.0);
    }
}
