//! Four-component priority scorer.
//!
//! Components: severity (0–40, tier lookup), urgency (0–30, vitals deltas),
//! impact (0–20, category lookup), confidence (0–10, evidence level).

use vigil_core::context::PatientContext;
use vigil_core::models::{Alert, PriorityScore};
use vigil_core::rule::{EvidenceLevel, RuleCategory, Severity, VitalSign};

/// Urgency baseline before vitals deltas.
pub const URGENCY_BASELINE: u32 = 15;
/// Heart rate above this adds +5 urgency.
pub const TACHYCARDIA_BPM: f64 = 120.0;
/// Systolic blood pressure above this adds +5 urgency.
pub const HYPERTENSIVE_SYSTOLIC: f64 = 180.0;
/// Temperature above this adds +3 urgency.
pub const FEBRILE_TEMP_C: f64 = 38.5;

/// Severity tier component (0–40). Unmapped tiers score 10.
pub fn severity_points(severity: Severity) -> u32 {
    match severity {
        Severity::Critical => 40,
        Severity::Severe => 30,
        Severity::Moderate => 20,
        Severity::Low => 15,
        Severity::Info => 5,
        Severity::Unknown => 10,
    }
}

/// Vitals-driven urgency component (0–30). The deltas are independent and
/// additive, not mutually exclusive.
pub fn urgency_points(ctx: &PatientContext) -> u32 {
    let mut points = URGENCY_BASELINE;
    if vital_above(ctx, VitalSign::HeartRate, TACHYCARDIA_BPM) {
        points += 5;
    }
    if vital_above(ctx, VitalSign::SystolicBp, HYPERTENSIVE_SYSTOLIC) {
        points += 5;
    }
    if vital_above(ctx, VitalSign::Temperature, FEBRILE_TEMP_C) {
        points += 3;
    }
    points
}

/// Category impact component (0–20).
pub fn impact_points(category: RuleCategory) -> u32 {
    match category {
        RuleCategory::DrugInteraction | RuleCategory::Contraindication => 20,
        RuleCategory::DrugAllergy => 18,
        _ => 10,
    }
}

/// Evidence confidence component (0–10).
pub fn confidence_points(level: EvidenceLevel) -> u32 {
    match level {
        EvidenceLevel::A => 10,
        EvidenceLevel::B => 8,
        EvidenceLevel::C => 6,
        _ => 5,
    }
}

/// Score one alert against the context it fired in.
pub fn score(alert: &Alert, ctx: &PatientContext) -> PriorityScore {
    PriorityScore::new(
        severity_points(alert.severity),
        urgency_points(ctx),
        impact_points(alert.category),
        confidence_points(alert.evidence.level),
    )
}

/// Sort alerts by priority descending. The sort is stable, so ties keep
/// their pre-sort (catalog) order.
pub fn rank(alerts: &mut [Alert]) {
    alerts.sort_by(|a, b| b.priority_total().cmp(&a.priority_total()));
}

fn vital_above(ctx: &PatientContext, sign: VitalSign, threshold: f64) -> bool {
    ctx.latest_vital(sign).is_some_and(|v| v.value > threshold)
}
