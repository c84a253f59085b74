//! The evaluation orchestrator.

use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use vigil_core::config::EngineConfig;
use vigil_core::context::PatientContext;
use vigil_core::errors::EvaluateError;
use vigil_core::models::{
    Alert, EvaluationRequest, EvaluationResult, MetricsSnapshot, RuleDiagnostic, Suggestion,
};
use vigil_core::rule::{Predicate, Rule, RuleCategory};
use vigil_core::traits::{IAlertHistory, IResultCache, ISuppressor};
use vigil_core::VigilResult;
use vigil_rules::catalog::{LoadOutcome, RuleCatalog};
use vigil_rules::evaluate::evaluate_rule;
use vigil_suppression::{AlertHistoryStore, SuppressionFilter};

use crate::cache::{cache_key, ResultCache};
use crate::metrics::MetricsRecorder;

/// The CDS alerting engine. Constructed once per process; every piece of
/// mutable state lives on the instance.
pub struct AlertEngine {
    catalog: RuleCatalog,
    history: Arc<dyn IAlertHistory>,
    suppressor: Arc<dyn ISuppressor>,
    cache: ResultCache,
    metrics: MetricsRecorder,
    config: EngineConfig,
}

impl AlertEngine {
    /// Create an engine with default collaborators. Suppression policies come
    /// from the config, falling back to the built-in defaults when empty.
    pub fn new(config: EngineConfig) -> Self {
        let history: Arc<dyn IAlertHistory> = Arc::new(AlertHistoryStore::with_retention_days(
            config.history_retention_days,
        ));
        let suppression_rules = if config.suppression_rules.is_empty() {
            vigil_suppression::default_rules()
        } else {
            config.suppression_rules.clone()
        };
        let suppressor: Arc<dyn ISuppressor> = Arc::new(SuppressionFilter::new(
            suppression_rules,
            Arc::clone(&history),
        ));
        Self::with_collaborators(config, history, suppressor)
    }

    /// Create an engine with injected history and suppressor.
    pub fn with_collaborators(
        config: EngineConfig,
        history: Arc<dyn IAlertHistory>,
        suppressor: Arc<dyn ISuppressor>,
    ) -> Self {
        Self {
            catalog: RuleCatalog::new(),
            history,
            suppressor,
            cache: ResultCache::from_config(&config.cache),
            metrics: MetricsRecorder::new(),
            config,
        }
    }

    /// Bulk-load the rule catalog, replacing any previous contents.
    pub fn load_rules(&self, rules: Vec<Rule>) -> LoadOutcome {
        self.catalog.load(rules)
    }

    /// Number of active rules.
    pub fn rule_count(&self) -> usize {
        self.catalog.len()
    }

    /// Rules dropped by the most recent load.
    pub fn rejected_rule_count(&self) -> u64 {
        self.catalog.rejected_count()
    }

    /// Evaluate all applicable rules for one request.
    ///
    /// Always returns a (possibly empty) ranked alert list; one failing rule
    /// is demoted to "did not fire" with a diagnostic, never an error.
    #[tracing::instrument(
        skip(self, request, context),
        fields(patient = %request.patient_id, trigger = %request.trigger)
    )]
    pub async fn evaluate(
        &self,
        request: &EvaluationRequest,
        context: &PatientContext,
    ) -> VigilResult<EvaluationResult> {
        let started = Instant::now();

        let key = cache_key(request);
        if self.config.cache_enabled {
            if let Some(cached) = self.cache.get(&key) {
                self.metrics.record_cache_hit(true);
                debug!("result cache hit, pipeline skipped");
                return Ok(cached);
            }
        }

        let now = Utc::now();
        let rules = self.catalog.applicable_rules(request);
        let rules_evaluated = rules.len();
        debug!(rules = rules_evaluated, "selected applicable rules");

        let (outcomes, mut diagnostics) = evaluate_fanout(&rules, context, now).await;

        let mut candidates = Vec::new();
        for (rule, outcome) in rules.iter().zip(outcomes) {
            match outcome {
                Ok(true) => candidates.push(build_alert(rule, context, now)),
                Ok(false) => {}
                Err(e) => {
                    warn!(rule = %rule.id, error = %e, "rule evaluation failed, treated as not fired");
                    diagnostics.push(RuleDiagnostic {
                        rule_id: rule.id.clone(),
                        detail: e.to_string(),
                    });
                }
            }
        }
        let rules_fired = candidates.len();

        let mut suppressed = 0u64;
        let mut alerts = Vec::with_capacity(candidates.len());
        for alert in candidates {
            if self
                .suppressor
                .should_suppress(&alert, &request.patient_id, now)
            {
                suppressed += 1;
            } else {
                alerts.push(alert);
            }
        }

        for alert in &mut alerts {
            alert.priority = Some(vigil_scoring::score(alert, context));
        }
        vigil_scoring::rank(&mut alerts);

        let suggestions = derive_suggestions(&alerts);
        let latency_ms = started.elapsed().as_secs_f64() * 1_000.0;

        let result = EvaluationResult {
            patient_id: request.patient_id.clone(),
            encounter_id: request.encounter_id.clone(),
            alerts,
            suggestions,
            rules_evaluated,
            rules_fired,
            diagnostics,
            latency_ms,
            evaluated_at: now,
        };

        self.metrics.record_evaluation(latency_ms, result.alerts.len());
        if self.config.cache_enabled {
            self.metrics.record_cache_hit(false);
        }
        if suppressed > 0 {
            self.metrics.record_suppressed(suppressed);
        }

        self.history.record_fired(&request.patient_id, &result.alerts);

        let cache_cutoff_ms = self.config.cache.latency_factor * self.config.latency_target_ms;
        if self.config.cache_enabled && latency_ms < cache_cutoff_ms {
            self.cache.put(key, result.clone());
        }

        info!(
            evaluated = rules_evaluated,
            fired = rules_fired,
            alerts = result.alerts.len(),
            suppressed,
            latency_ms,
            "evaluation complete"
        );
        Ok(result)
    }

    /// Immutable copy of the current performance metrics.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Report the outcome of an override prompt. Terminal alert transitions
    /// happen outside the engine, so the caller feeds this back.
    pub fn record_override(&self, overridden: bool) {
        self.metrics.record_override(overridden);
    }

    /// Drop every cached result (administrative use).
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

/// Fan out rule evaluation: every applicable rule runs concurrently (and each
/// rule's conditions run concurrently within it), then everything joins back
/// here before any shared state is touched. Outcomes keep catalog order.
async fn evaluate_fanout(
    rules: &[Rule],
    context: &PatientContext,
    now: DateTime<Utc>,
) -> (Vec<Result<bool, EvaluateError>>, Vec<RuleDiagnostic>) {
    let ctx = Arc::new(context.clone());
    let mut join_set = JoinSet::new();
    for (idx, rule) in rules.iter().cloned().enumerate() {
        let ctx = Arc::clone(&ctx);
        join_set.spawn(async move {
            let outcome = AssertUnwindSafe(evaluate_rule(&rule, &ctx, now))
                .catch_unwind()
                .await
                .unwrap_or_else(|_| {
                    Err(EvaluateError::TaskFailed {
                        reason: "panic during rule evaluation".into(),
                    })
                });
            (idx, outcome)
        });
    }

    let mut outcomes: Vec<Result<bool, EvaluateError>> = vec![Ok(false); rules.len()];
    let mut diagnostics = Vec::new();
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((idx, outcome)) => outcomes[idx] = outcome,
            Err(e) => {
                // Panics are already mapped to TaskFailed inside the task;
                // this only fires on runtime-level join failures.
                warn!(error = %e, "rule evaluation task lost");
                diagnostics.push(RuleDiagnostic {
                    rule_id: String::new(),
                    detail: e.to_string(),
                });
            }
        }
    }
    (outcomes, diagnostics)
}

fn build_alert(rule: &Rule, context: &PatientContext, now: DateTime<Utc>) -> Alert {
    Alert::from_rule(rule, extract_facts(rule, context), now)
}

/// Clinical facts copied onto the alert's evidence payload so the caller can
/// render what the rule saw.
fn extract_facts(rule: &Rule, context: &PatientContext) -> BTreeMap<String, String> {
    let mut facts = BTreeMap::new();
    match rule.category {
        RuleCategory::DrugInteraction
        | RuleCategory::Contraindication
        | RuleCategory::DrugAllergy => {
            if !context.medications.is_empty() {
                facts.insert(
                    "active_medications".to_string(),
                    context
                        .medications
                        .iter()
                        .map(|m| m.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                );
            }
            if rule.category == RuleCategory::DrugAllergy && !context.allergies.is_empty() {
                facts.insert(
                    "allergies".to_string(),
                    context
                        .allergies
                        .iter()
                        .map(|a| a.substance.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                );
            }
        }
        _ => {}
    }

    // Latest reading for each analyte the rule's conditions reference.
    for condition in &rule.conditions {
        if let Predicate::Lab { analyte } = &condition.predicate {
            if let Some(latest) = context
                .labs
                .iter()
                .filter(|l| l.analyte.eq_ignore_ascii_case(analyte))
                .max_by_key(|l| l.taken_at)
            {
                facts.insert(
                    format!("lab:{}", analyte.to_lowercase()),
                    format!("{} {}", latest.value, latest.unit),
                );
            }
        }
    }
    facts
}

/// One suggestion per alternative on each surviving alert, carrying the
/// alert's priority as its own.
fn derive_suggestions(alerts: &[Alert]) -> Vec<Suggestion> {
    alerts
        .iter()
        .flat_map(|alert| {
            alert.alternatives.iter().map(|alt| Suggestion {
                alert_id: alert.id.clone(),
                rule_id: alert.rule_id.clone(),
                text: alt.clone(),
                priority: alert.priority_total(),
            })
        })
        .collect()
}
