use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{VigilError, VigilResult};
use crate::models::SuppressionRule;

/// Result cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Entry time-to-live in seconds.
    pub ttl_secs: u64,
    /// Maximum entry count; the oldest-inserted entry is evicted when full.
    pub max_entries: usize,
    /// Results slower than `latency_factor × latency_target_ms` are not
    /// cached — a pathologically slow evaluation may reflect a transient
    /// anomaly rather than a stable result.
    pub latency_factor: f64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: defaults::DEFAULT_CACHE_TTL_SECS,
            max_entries: defaults::DEFAULT_CACHE_MAX_ENTRIES,
            latency_factor: defaults::DEFAULT_CACHE_LATENCY_FACTOR,
        }
    }
}

/// Engine-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Interactive latency target in milliseconds.
    pub latency_target_ms: f64,
    /// Alert history retention horizon in days.
    pub history_retention_days: i64,
    /// Whether evaluation results are cached at all.
    pub cache_enabled: bool,
    pub cache: CacheConfig,
    /// Per-category suppression policies. When empty, the engine falls back
    /// to its built-in defaults.
    pub suppression_rules: Vec<SuppressionRule>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            latency_target_ms: defaults::DEFAULT_LATENCY_TARGET_MS,
            history_retention_days: defaults::DEFAULT_HISTORY_RETENTION_DAYS,
            cache_enabled: true,
            cache: CacheConfig::default(),
            suppression_rules: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> VigilResult<Self> {
        toml::from_str(text).map_err(|e| VigilError::Config {
            reason: e.to_string(),
        })
    }
}
