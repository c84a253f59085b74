use chrono::Utc;
use proptest::prelude::*;
use std::collections::BTreeMap;

use vigil_core::context::{PatientContext, VitalReading};
use vigil_core::models::Alert;
use vigil_core::rule::{
    ActionSet, Evidence, EvidenceLevel, Rule, RuleCategory, Severity, VitalSign,
};
use vigil_scoring::score;

fn severities() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Critical),
        Just(Severity::Severe),
        Just(Severity::Moderate),
        Just(Severity::Low),
        Just(Severity::Info),
        Just(Severity::Unknown),
    ]
}

fn categories() -> impl Strategy<Value = RuleCategory> {
    prop_oneof![
        Just(RuleCategory::DrugInteraction),
        Just(RuleCategory::DrugAllergy),
        Just(RuleCategory::Contraindication),
        Just(RuleCategory::LabMonitoring),
        Just(RuleCategory::DoseCheck),
        Just(RuleCategory::QualityMeasure),
    ]
}

fn evidence_levels() -> impl Strategy<Value = EvidenceLevel> {
    prop_oneof![
        Just(EvidenceLevel::A),
        Just(EvidenceLevel::B),
        Just(EvidenceLevel::C),
        Just(EvidenceLevel::D),
        Just(EvidenceLevel::Unrated),
    ]
}

fn alert_with(category: RuleCategory, severity: Severity, level: EvidenceLevel) -> Alert {
    let rule = Rule {
        id: "r1".into(),
        name: "property".into(),
        category,
        severity,
        conditions: vec![],
        actions: ActionSet {
            message: "m".into(),
            recommendation: None,
            alternatives: vec![],
            requires_override: false,
            escalation: None,
        },
        evidence: Evidence {
            level,
            references: vec![],
            version: "1".into(),
        },
        enabled: true,
    };
    Alert::from_rule(&rule, BTreeMap::new(), Utc::now())
}

fn context_with(hr: f64, sbp: f64, temp: f64) -> PatientContext {
    let now = Utc::now();
    PatientContext {
        vitals: vec![
            VitalReading { sign: VitalSign::HeartRate, value: hr, taken_at: now },
            VitalReading { sign: VitalSign::SystolicBp, value: sbp, taken_at: now },
            VitalReading { sign: VitalSign::Temperature, value: temp, taken_at: now },
        ],
        ..Default::default()
    }
}

proptest! {
    #[test]
    fn score_stays_within_bounds(
        severity in severities(),
        category in categories(),
        level in evidence_levels(),
        hr in 20.0f64..250.0,
        sbp in 50.0f64..260.0,
        temp in 34.0f64..43.0,
    ) {
        let alert = alert_with(category, severity, level);
        let ctx = context_with(hr, sbp, temp);
        let s = score(&alert, &ctx);

        prop_assert!(s.severity <= 40);
        prop_assert!(s.urgency <= 30);
        prop_assert!(s.impact <= 20);
        prop_assert!(s.confidence <= 10);
        prop_assert!(s.total <= 100);
        prop_assert_eq!(
            s.total,
            (s.severity + s.urgency + s.impact + s.confidence).min(100)
        );
    }

    #[test]
    fn scoring_is_deterministic(
        severity in severities(),
        category in categories(),
        level in evidence_levels(),
        hr in 20.0f64..250.0,
    ) {
        let alert = alert_with(category, severity, level);
        let ctx = context_with(hr, 120.0, 37.0);
        prop_assert_eq!(score(&alert, &ctx), score(&alert, &ctx));
    }
}
