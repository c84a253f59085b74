use serde::{Deserialize, Serialize};

/// Immutable copy of the engine's running performance counters.
///
/// Accuracy under concurrent load is approximate; this is an accepted
/// relaxation, not a bug.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_evaluations: u64,
    /// Incremental mean evaluation latency in milliseconds.
    pub avg_latency_ms: f64,
    /// Running fraction of cache lookups that hit.
    pub cache_hit_rate: f64,
    pub alerts_fired: u64,
    pub alerts_suppressed: u64,
    /// Running fraction of override-prompted alerts the caller overrode.
    pub override_rate: f64,
}
