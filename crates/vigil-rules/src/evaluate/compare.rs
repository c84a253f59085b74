//! Comparator application helpers shared by the predicate kinds.
//!
//! `Exists` never reaches these helpers; each predicate kind answers it from
//! the presence of data. A comparator applied to an incompatible value kind
//! is an error, not a silent false — the catalog rejects such rules at load,
//! so hitting one here means a rule bypassed validation.

use vigil_core::errors::EvaluateError;
use vigil_core::rule::{Comparator, ComparisonValue};

fn mismatch(op: Comparator, value: &ComparisonValue) -> EvaluateError {
    EvaluateError::ComparatorMismatch {
        comparator: op.to_string(),
        value_kind: value.kind_name().to_string(),
    }
}

fn missing(op: Comparator) -> EvaluateError {
    EvaluateError::MissingValue {
        comparator: op.to_string(),
    }
}

/// Apply a comparator to one numeric datum.
pub fn number(
    op: Comparator,
    actual: f64,
    expected: Option<&ComparisonValue>,
) -> Result<bool, EvaluateError> {
    let expected = expected.ok_or_else(|| missing(op))?;
    match (op, expected) {
        (Comparator::Equals, ComparisonValue::Number(n)) => Ok(actual == *n),
        (Comparator::NotEquals, ComparisonValue::Number(n)) => Ok(actual != *n),
        (Comparator::GreaterThan, ComparisonValue::Number(n)) => Ok(actual > *n),
        (Comparator::LessThan, ComparisonValue::Number(n)) => Ok(actual < *n),
        (Comparator::Between, ComparisonValue::Range { low, high }) => {
            Ok(actual >= *low && actual <= *high)
        }
        (_, value) => Err(mismatch(op, value)),
    }
}

/// Apply a comparator to one text datum. Matching is case-insensitive.
pub fn text(
    op: Comparator,
    actual: &str,
    expected: Option<&ComparisonValue>,
) -> Result<bool, EvaluateError> {
    let expected = expected.ok_or_else(|| missing(op))?;
    match (op, expected) {
        (Comparator::Equals, ComparisonValue::Text(t)) => Ok(actual.eq_ignore_ascii_case(t)),
        (Comparator::NotEquals, ComparisonValue::Text(t)) => Ok(!actual.eq_ignore_ascii_case(t)),
        (Comparator::In, ComparisonValue::List(list)) => {
            Ok(list.iter().any(|t| actual.eq_ignore_ascii_case(t)))
        }
        (_, value) => Err(mismatch(op, value)),
    }
}

/// Apply a comparator to a set of codes (diagnoses, medications, procedures).
/// `Equals`/`In` are any-match; `NotEquals` holds only when no code matches.
pub fn codes(
    op: Comparator,
    actual: &[&str],
    expected: Option<&ComparisonValue>,
) -> Result<bool, EvaluateError> {
    let expected = expected.ok_or_else(|| missing(op))?;
    match (op, expected) {
        (Comparator::Equals, ComparisonValue::Text(t)) => {
            Ok(actual.iter().any(|c| c.eq_ignore_ascii_case(t)))
        }
        (Comparator::NotEquals, ComparisonValue::Text(t)) => {
            Ok(!actual.iter().any(|c| c.eq_ignore_ascii_case(t)))
        }
        (Comparator::In, ComparisonValue::List(list)) => Ok(actual
            .iter()
            .any(|c| list.iter().any(|t| c.eq_ignore_ascii_case(t)))),
        (_, value) => Err(mismatch(op, value)),
    }
}
