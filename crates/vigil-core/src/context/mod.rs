//! Patient context snapshot.
//!
//! Assembled by the caller's clinical-data service and treated as read-only
//! input; the engine never mutates it and never fetches data itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rule::VitalSign;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Demographics {
    pub age_years: Option<f64>,
    pub gender: Option<String>,
}

/// One timestamped vital sign reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalReading {
    pub sign: VitalSign,
    pub value: f64,
    pub taken_at: DateTime<Utc>,
}

/// An active medication on the patient's list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allergy {
    pub substance: String,
    #[serde(default)]
    pub reaction: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub onset: Option<DateTime<Utc>>,
}

/// One lab result for a single analyte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabResult {
    pub analyte: String,
    pub value: f64,
    #[serde(default)]
    pub unit: String,
    pub taken_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureRecord {
    pub code: String,
    pub performed_at: DateTime<Utc>,
}

/// Generic coded numeric observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub code: String,
    pub value: f64,
    pub taken_at: DateTime<Utc>,
}

/// The patient-specific snapshot an evaluation runs against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientContext {
    pub patient_id: String,
    pub demographics: Demographics,
    pub vitals: Vec<VitalReading>,
    pub medications: Vec<Medication>,
    pub allergies: Vec<Allergy>,
    pub diagnoses: Vec<Diagnosis>,
    pub labs: Vec<LabResult>,
    pub procedures: Vec<ProcedureRecord>,
    pub observations: Vec<ObservationRecord>,
    pub encounter_type: Option<String>,
    pub encounter_id: Option<String>,
    pub organization_id: Option<String>,
}

impl PatientContext {
    /// The most recent reading of one vital sign, if any.
    pub fn latest_vital(&self, sign: VitalSign) -> Option<&VitalReading> {
        self.vitals
            .iter()
            .filter(|v| v.sign == sign)
            .max_by_key(|v| v.taken_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn latest_vital_picks_most_recent_reading() {
        let t0 = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let ctx = PatientContext {
            vitals: vec![
                VitalReading {
                    sign: VitalSign::HeartRate,
                    value: 88.0,
                    taken_at: t0,
                },
                VitalReading {
                    sign: VitalSign::HeartRate,
                    value: 132.0,
                    taken_at: t1,
                },
                VitalReading {
                    sign: VitalSign::Temperature,
                    value: 37.0,
                    taken_at: t1,
                },
            ],
            ..Default::default()
        };
        assert_eq!(ctx.latest_vital(VitalSign::HeartRate).unwrap().value, 132.0);
        assert!(ctx.latest_vital(VitalSign::SystolicBp).is_none());
    }
}
