//! Validated, in-memory store of enabled rules.
//!
//! Invalid rules are rejected at load, never stored, and never crash an
//! evaluation; their count stays observable via [`RuleCatalog::rejected_count`].

use std::sync::RwLock;

use tracing::{info, warn};

use vigil_core::errors::CatalogError;
use vigil_core::models::EvaluationRequest;
use vigil_core::rule::{Comparator, ComparisonValue, Condition, Predicate, Rule, RuleCategory};

/// What a bulk load did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOutcome {
    pub loaded: usize,
    pub rejected: usize,
}

#[derive(Default)]
struct CatalogState {
    rules: Vec<Rule>,
    rejected: u64,
}

/// In-memory rule catalog. `load` replaces the whole catalog; reads hand out
/// clones in insertion order.
pub struct RuleCatalog {
    state: RwLock<CatalogState>,
}

impl RuleCatalog {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(CatalogState::default()),
        }
    }

    /// Replace the entire catalog with the valid subset of `rules`.
    pub fn load(&self, rules: Vec<Rule>) -> LoadOutcome {
        let mut accepted = Vec::with_capacity(rules.len());
        let mut rejected = 0usize;
        for rule in rules {
            match validate(&rule) {
                Ok(()) => accepted.push(rule),
                Err(e) => {
                    rejected += 1;
                    warn!(error = %e, "rule rejected at load");
                }
            }
        }

        let outcome = LoadOutcome {
            loaded: accepted.len(),
            rejected,
        };
        let mut state = self.state.write().expect("catalog lock poisoned");
        state.rules = accepted;
        state.rejected = rejected as u64;
        info!(
            loaded = outcome.loaded,
            rejected = outcome.rejected,
            "rule catalog loaded"
        );
        outcome
    }

    /// Enabled rules matching the request's scope and exclusion list, in
    /// catalog insertion order.
    pub fn applicable_rules(&self, request: &EvaluationRequest) -> Vec<Rule> {
        let state = self.state.read().expect("catalog lock poisoned");
        state
            .rules
            .iter()
            .filter(|r| r.enabled)
            .filter(|r| match &request.scope {
                Some(scope) => scope.contains(&r.category),
                None => true,
            })
            .filter(|r| !request.exclude_rules.contains(&r.id))
            .cloned()
            .collect()
    }

    /// Number of active rules.
    pub fn len(&self) -> usize {
        self.state.read().expect("catalog lock poisoned").rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rules dropped by the most recent load.
    pub fn rejected_count(&self) -> u64 {
        self.state.read().expect("catalog lock poisoned").rejected
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(rule: &Rule) -> Result<(), CatalogError> {
    if rule.id.trim().is_empty() {
        return Err(CatalogError::MissingId);
    }
    if rule.name.trim().is_empty() {
        return Err(CatalogError::MissingName {
            rule_id: rule.id.clone(),
        });
    }
    if rule.category == RuleCategory::Unknown {
        return Err(CatalogError::UnknownCategory {
            rule_id: rule.id.clone(),
        });
    }
    if rule.conditions.is_empty() {
        return Err(CatalogError::NoConditions {
            rule_id: rule.id.clone(),
        });
    }
    for (index, condition) in rule.conditions.iter().enumerate() {
        validate_condition(&rule.id, index, condition)?;
    }
    Ok(())
}

/// Comparator/value compatibility, checked here so evaluation never has to
/// reason about malformed pairings.
fn validate_condition(
    rule_id: &str,
    index: usize,
    condition: &Condition,
) -> Result<(), CatalogError> {
    // Unknown kinds are kept: they evaluate false at runtime (fail-closed).
    if condition.predicate == Predicate::Unknown {
        return Ok(());
    }
    let invalid = |reason: &str| CatalogError::InvalidCondition {
        rule_id: rule_id.to_string(),
        index,
        reason: reason.to_string(),
    };
    match (condition.op, condition.value.as_ref()) {
        (Comparator::Exists, _) => Ok(()),
        (_, None) => Err(invalid("comparator requires a comparison value")),
        (Comparator::Between, Some(ComparisonValue::Range { low, high })) => {
            if low > high {
                Err(invalid("between range has low > high"))
            } else {
                Ok(())
            }
        }
        (Comparator::Between, Some(_)) => Err(invalid("between requires a range value")),
        (Comparator::In, Some(ComparisonValue::List(_))) => Ok(()),
        (Comparator::In, Some(_)) => Err(invalid("in requires a list value")),
        (Comparator::GreaterThan | Comparator::LessThan, Some(ComparisonValue::Number(_))) => {
            Ok(())
        }
        (Comparator::GreaterThan | Comparator::LessThan, Some(_)) => {
            Err(invalid("ordering comparators require a number value"))
        }
        (Comparator::Equals | Comparator::NotEquals, Some(_)) => Ok(()),
    }
}
