//! Typed condition predicates.
//!
//! Each predicate kind is a tagged-enum variant carrying only the fields
//! relevant to that kind, validated at the rule-load boundary rather than
//! at evaluation time.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a condition's result joins the accumulated result of the conditions
/// before it. The combination is a strict left fold, not a global operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicOp {
    #[default]
    And,
    Or,
}

/// Comparison operator applied to the data a predicate selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    Between,
    In,
    Exists,
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::GreaterThan => "greater_than",
            Self::LessThan => "less_than",
            Self::Between => "between",
            Self::In => "in",
            Self::Exists => "exists",
        };
        f.write_str(s)
    }
}

/// Typed comparison value. Untagged so rule JSON stays natural:
/// `6.0`, `{"low": 3.5, "high": 5.0}`, `"female"`, `["I50", "I51"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComparisonValue {
    Number(f64),
    Range { low: f64, high: f64 },
    Text(String),
    List(Vec<String>),
}

impl ComparisonValue {
    /// Short name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Range { .. } => "range",
            Self::Text(_) => "text",
            Self::List(_) => "list",
        }
    }
}

/// Vital sign identifiers understood by the evaluator and the urgency scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalSign {
    HeartRate,
    SystolicBp,
    DiastolicBp,
    Temperature,
    RespiratoryRate,
    OxygenSaturation,
    #[serde(other)]
    Other,
}

/// Lookback window unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Hours,
    Days,
    Weeks,
}

/// Optional lookback restricting a predicate to recent data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timeframe {
    pub value: i64,
    pub unit: TimeUnit,
}

impl Timeframe {
    pub fn to_duration(self) -> Duration {
        match self.unit {
            TimeUnit::Hours => Duration::hours(self.value),
            TimeUnit::Days => Duration::days(self.value),
            TimeUnit::Weeks => Duration::weeks(self.value),
        }
    }
}

/// What a condition tests. Each variant carries only its selector fields;
/// the comparator and value live on [`Condition`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    /// Patient age in years.
    Age,
    /// Patient gender.
    Gender,
    /// Diagnosis codes on the problem list.
    Diagnosis,
    /// Active medications, matched by name or code.
    Medication,
    /// Lab results for one analyte.
    Lab { analyte: String },
    /// Readings of one vital sign.
    Vital { sign: VitalSign },
    /// Current encounter type.
    Encounter,
    /// Performed procedure codes.
    Procedure,
    /// Generic coded numeric observations.
    Observation { code: String },
    /// Unrecognized kind — always evaluates false (fail-closed).
    #[serde(other)]
    Unknown,
}

impl Predicate {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Gender => "gender",
            Self::Diagnosis => "diagnosis",
            Self::Medication => "medication",
            Self::Lab { .. } => "lab",
            Self::Vital { .. } => "vital",
            Self::Encounter => "encounter",
            Self::Procedure => "procedure",
            Self::Observation { .. } => "observation",
            Self::Unknown => "unknown",
        }
    }
}

/// A single typed predicate over patient context, optionally time-windowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub logic: LogicOp,
    pub predicate: Predicate,
    pub op: Comparator,
    #[serde(default)]
    pub value: Option<ComparisonValue>,
    #[serde(default)]
    pub lookback: Option<Timeframe>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_deserializes_fail_closed() {
        let condition: Condition = serde_json::from_value(serde_json::json!({
            "predicate": { "kind": "genomic_marker" },
            "op": "exists"
        }))
        .unwrap();
        assert_eq!(condition.predicate, Predicate::Unknown);
        assert_eq!(condition.logic, LogicOp::And);
    }

    #[test]
    fn comparison_values_stay_natural_in_json() {
        let number: ComparisonValue = serde_json::from_str("6.5").unwrap();
        assert_eq!(number, ComparisonValue::Number(6.5));

        let range: ComparisonValue =
            serde_json::from_str(r#"{"low": 3.5, "high": 5.0}"#).unwrap();
        assert_eq!(range, ComparisonValue::Range { low: 3.5, high: 5.0 });

        let list: ComparisonValue = serde_json::from_str(r#"["I50", "I51"]"#).unwrap();
        assert_eq!(
            list,
            ComparisonValue::List(vec!["I50".into(), "I51".into()])
        );
    }

    #[test]
    fn lookback_converts_to_duration() {
        let tf = Timeframe {
            value: 48,
            unit: TimeUnit::Hours,
        };
        assert_eq!(tf.to_duration(), Duration::hours(48));
    }
}
