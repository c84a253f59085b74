//! Per-kind predicate dispatch.
//!
//! A lookback timeframe restricts the searched records to
//! `taken_at >= now − lookback` before the comparator applies. Records
//! without a timestamp are excluded once a lookback is declared — an
//! unconfirmable timestamp never satisfies a windowed predicate.
//! Unknown kinds evaluate false.

use chrono::{DateTime, Utc};

use vigil_core::context::PatientContext;
use vigil_core::errors::EvaluateError;
use vigil_core::rule::{Comparator, Condition, Predicate};

use super::compare;

/// Evaluate a single condition against the context snapshot.
pub fn evaluate(
    condition: &Condition,
    ctx: &PatientContext,
    now: DateTime<Utc>,
) -> Result<bool, EvaluateError> {
    let cutoff = condition.lookback.map(|tf| now - tf.to_duration());
    let op = condition.op;
    let value = condition.value.as_ref();

    match &condition.predicate {
        Predicate::Age => match (op, ctx.demographics.age_years) {
            (Comparator::Exists, age) => Ok(age.is_some()),
            (_, Some(age)) => compare::number(op, age, value),
            (_, None) => Ok(false),
        },

        Predicate::Gender => match (op, ctx.demographics.gender.as_deref()) {
            (Comparator::Exists, gender) => Ok(gender.is_some()),
            (_, Some(gender)) => compare::text(op, gender, value),
            (_, None) => Ok(false),
        },

        Predicate::Diagnosis => {
            let codes: Vec<&str> = ctx
                .diagnoses
                .iter()
                .filter(|d| in_optional_window(d.onset, cutoff))
                .map(|d| d.code.as_str())
                .collect();
            if op == Comparator::Exists {
                return Ok(!codes.is_empty());
            }
            compare::codes(op, &codes, value)
        }

        Predicate::Medication => {
            // Medications match by code or by name.
            let meds: Vec<&str> = ctx
                .medications
                .iter()
                .filter(|m| in_optional_window(m.started_at, cutoff))
                .flat_map(|m| {
                    std::iter::once(m.name.as_str()).chain(m.code.as_deref())
                })
                .collect();
            if op == Comparator::Exists {
                return Ok(!meds.is_empty());
            }
            compare::codes(op, &meds, value)
        }

        Predicate::Lab { analyte } => {
            let readings = ctx
                .labs
                .iter()
                .filter(|l| l.analyte.eq_ignore_ascii_case(analyte))
                .filter(|l| in_window(l.taken_at, cutoff));
            any_number(op, readings.map(|l| l.value), value)
        }

        Predicate::Vital { sign } => {
            let readings = ctx
                .vitals
                .iter()
                .filter(|v| v.sign == *sign)
                .filter(|v| in_window(v.taken_at, cutoff));
            any_number(op, readings.map(|v| v.value), value)
        }

        Predicate::Encounter => match (op, ctx.encounter_type.as_deref()) {
            (Comparator::Exists, encounter) => Ok(encounter.is_some()),
            (_, Some(encounter)) => compare::text(op, encounter, value),
            (_, None) => Ok(false),
        },

        Predicate::Procedure => {
            let codes: Vec<&str> = ctx
                .procedures
                .iter()
                .filter(|p| in_window(p.performed_at, cutoff))
                .map(|p| p.code.as_str())
                .collect();
            if op == Comparator::Exists {
                return Ok(!codes.is_empty());
            }
            compare::codes(op, &codes, value)
        }

        Predicate::Observation { code } => {
            let readings = ctx
                .observations
                .iter()
                .filter(|o| o.code.eq_ignore_ascii_case(code))
                .filter(|o| in_window(o.taken_at, cutoff));
            any_number(op, readings.map(|o| o.value), value)
        }

        // Fail-closed, never fail-open.
        Predicate::Unknown => Ok(false),
    }
}

/// Any-match numeric comparison over in-window readings: the predicate holds
/// if at least one reading satisfies the comparator. No readings ⇒ false.
fn any_number(
    op: Comparator,
    readings: impl Iterator<Item = f64>,
    value: Option<&vigil_core::rule::ComparisonValue>,
) -> Result<bool, EvaluateError> {
    if op == Comparator::Exists {
        let mut readings = readings;
        return Ok(readings.next().is_some());
    }
    for reading in readings {
        if compare::number(op, reading, value)? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn in_window(ts: DateTime<Utc>, cutoff: Option<DateTime<Utc>>) -> bool {
    cutoff.map_or(true, |c| ts >= c)
}

fn in_optional_window(ts: Option<DateTime<Utc>>, cutoff: Option<DateTime<Utc>>) -> bool {
    match cutoff {
        None => true,
        Some(c) => ts.is_some_and(|t| t >= c),
    }
}
