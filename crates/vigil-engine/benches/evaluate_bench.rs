//! Evaluation latency benchmark — the engine targets sub-100ms responses at
//! interactive call sites, and this keeps the full pipeline honest.

use criterion::{criterion_group, criterion_main, Criterion};
use tokio::runtime::Runtime;

use vigil_core::config::EngineConfig;
use vigil_core::context::{Demographics, Medication, PatientContext};
use vigil_core::models::EvaluationRequest;
use vigil_core::rule::{
    ActionSet, Comparator, ComparisonValue, Condition, LogicOp, Predicate, Rule, RuleCategory,
    Severity,
};
use vigil_engine::AlertEngine;

fn rules(count: usize) -> Vec<Rule> {
    (0..count)
        .map(|i| Rule {
            id: format!("rule-{i}"),
            name: format!("benchmark rule {i}"),
            category: RuleCategory::DoseCheck,
            severity: Severity::Moderate,
            conditions: vec![
                Condition {
                    logic: LogicOp::And,
                    predicate: Predicate::Age,
                    op: Comparator::GreaterThan,
                    value: Some(ComparisonValue::Number(60.0 + (i % 50) as f64)),
                    lookback: None,
                },
                Condition {
                    logic: LogicOp::And,
                    predicate: Predicate::Medication,
                    op: Comparator::Equals,
                    value: Some(ComparisonValue::Text("metformin".into())),
                    lookback: None,
                },
            ],
            actions: ActionSet {
                message: format!("dose review {i}"),
                recommendation: None,
                alternatives: vec![],
                requires_override: false,
                escalation: None,
            },
            evidence: Default::default(),
            enabled: true,
        })
        .collect()
}

fn context() -> PatientContext {
    PatientContext {
        patient_id: "bench-patient".into(),
        demographics: Demographics {
            age_years: Some(63.0),
            gender: Some("male".into()),
        },
        medications: vec![Medication {
            name: "metformin".into(),
            code: None,
            started_at: None,
        }],
        ..Default::default()
    }
}

fn bench_evaluate(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");

    let cold = AlertEngine::new(EngineConfig {
        cache_enabled: false,
        ..Default::default()
    });
    cold.load_rules(rules(100));
    let request = EvaluationRequest::new("bench-patient", "order-entry");
    let ctx = context();

    c.bench_function("evaluate_100_rules_uncached", |b| {
        b.iter(|| {
            rt.block_on(async { cold.evaluate(&request, &ctx).await.unwrap() });
        })
    });

    let warm = AlertEngine::new(EngineConfig::default());
    warm.load_rules(rules(100));
    rt.block_on(async { warm.evaluate(&request, &ctx).await.unwrap() });

    c.bench_function("evaluate_100_rules_cached", |b| {
        b.iter(|| {
            rt.block_on(async { warm.evaluate(&request, &ctx).await.unwrap() });
        })
    });
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
