//! Running performance counters.
//!
//! Averages use the incremental-mean formula, so no sample list is retained.
//! Concurrent requests may interleave updates; approximate accuracy under
//! load is an accepted relaxation.

use std::sync::Mutex;

use vigil_core::models::MetricsSnapshot;

#[derive(Debug, Default)]
struct MetricsInner {
    total_evaluations: u64,
    avg_latency_ms: f64,
    cache_lookups: u64,
    cache_hit_rate: f64,
    alerts_fired: u64,
    alerts_suppressed: u64,
    override_outcomes: u64,
    override_rate: f64,
}

/// Process-wide metrics recorder. Counters start at zero and are never reset
/// except by dropping the engine.
pub struct MetricsRecorder {
    inner: Mutex<MetricsInner>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsInner::default()),
        }
    }

    /// Record one completed (non-cached) evaluation.
    pub fn record_evaluation(&self, latency_ms: f64, alert_count: usize) {
        let mut m = self.inner.lock().expect("metrics lock poisoned");
        m.total_evaluations += 1;
        let n = m.total_evaluations as f64;
        m.avg_latency_ms = (m.avg_latency_ms * (n - 1.0) + latency_ms) / n;
        m.alerts_fired += alert_count as u64;
    }

    /// Record one cache lookup outcome; a hit counts 1, a miss 0.
    pub fn record_cache_hit(&self, hit: bool) {
        let mut m = self.inner.lock().expect("metrics lock poisoned");
        m.cache_lookups += 1;
        let n = m.cache_lookups as f64;
        let value = if hit { 1.0 } else { 0.0 };
        m.cache_hit_rate = (m.cache_hit_rate * (n - 1.0) + value) / n;
    }

    pub fn record_suppressed(&self, count: u64) {
        let mut m = self.inner.lock().expect("metrics lock poisoned");
        m.alerts_suppressed += count;
    }

    /// Record the outcome of an override prompt, reported by the caller once
    /// the alert reaches a terminal state.
    pub fn record_override(&self, overridden: bool) {
        let mut m = self.inner.lock().expect("metrics lock poisoned");
        m.override_outcomes += 1;
        let n = m.override_outcomes as f64;
        let value = if overridden { 1.0 } else { 0.0 };
        m.override_rate = (m.override_rate * (n - 1.0) + value) / n;
    }

    /// Immutable copy of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let m = self.inner.lock().expect("metrics lock poisoned");
        MetricsSnapshot {
            total_evaluations: m.total_evaluations,
            avg_latency_ms: m.avg_latency_ms,
            cache_hit_rate: m.cache_hit_rate,
            alerts_fired: m.alerts_fired,
            alerts_suppressed: m.alerts_suppressed,
            override_rate: m.override_rate,
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
