//! Condition evaluation: per-kind dispatch, lookback windows, left-fold
//! combination.
//!
//! Predicates are stateless and side-effect-free, so a rule's conditions are
//! launched concurrently and awaited together; only the order of
//! *combination* matters, and the fold preserves it exactly.

pub mod compare;
pub mod fold;
pub mod predicate;

pub use fold::fold_results;
pub use predicate::evaluate as evaluate_condition;

use chrono::{DateTime, Utc};
use futures::future::join_all;

use vigil_core::context::PatientContext;
use vigil_core::errors::EvaluateError;
use vigil_core::rule::Rule;

/// Evaluate one rule against a context snapshot.
///
/// All conditions are evaluated concurrently, then folded left-to-right with
/// each condition's own logical operator. A rule with zero conditions never
/// fires. Any condition error fails the whole rule (the orchestrator demotes
/// it to "did not fire" and records a diagnostic).
pub async fn evaluate_rule(
    rule: &Rule,
    ctx: &PatientContext,
    now: DateTime<Utc>,
) -> Result<bool, EvaluateError> {
    if rule.conditions.is_empty() {
        return Ok(false);
    }

    let results = join_all(
        rule.conditions
            .iter()
            .map(|c| async move { predicate::evaluate(c, ctx, now) }),
    )
    .await;

    let mut folded = Vec::with_capacity(results.len());
    for (condition, result) in rule.conditions.iter().zip(results) {
        folded.push((condition.logic, result?));
    }
    Ok(fold::fold_results(&folded))
}
