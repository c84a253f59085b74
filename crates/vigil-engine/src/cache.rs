//! TTL-bounded result cache with insertion-order eviction.
//!
//! Keys are blake3 hashes over (patient id, trigger, scope list). Eviction is
//! strictly oldest-inserted-first; TTL is enforced at lookup time.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use vigil_core::config::CacheConfig;
use vigil_core::models::{EvaluationRequest, EvaluationResult};
use vigil_core::traits::IResultCache;

/// Deterministic cache key for a request. The exclusion list is deliberately
/// not part of the key.
pub fn cache_key(request: &EvaluationRequest) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(request.patient_id.as_bytes());
    hasher.update(&[0]);
    hasher.update(request.trigger.as_bytes());
    if let Some(scope) = &request.scope {
        for category in scope {
            hasher.update(&[0]);
            hasher.update(category.as_str().as_bytes());
        }
    }
    hasher.finalize().to_hex().to_string()
}

struct CacheEntry {
    result: EvaluationResult,
    inserted_at: Instant,
}

#[derive(Default)]
struct CacheInner {
    map: HashMap<String, CacheEntry>,
    /// Keys in insertion order; the front is next to be evicted.
    order: VecDeque<String>,
}

/// Whole-evaluation result cache.
pub struct ResultCache {
    inner: Mutex<CacheInner>,
    ttl: Duration,
    max_entries: usize,
}

impl ResultCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner::default()),
            ttl,
            max_entries,
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(Duration::from_secs(config.ttl_secs), config.max_entries)
    }
}

impl IResultCache for ResultCache {
    fn get(&self, key: &str) -> Option<EvaluationResult> {
        let mut inner = self.inner.lock().expect("cache lock poisoned");
        let expired = match inner.map.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                return Some(entry.result.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            inner.map.remove(key);
            inner.order.retain(|k| k != key);
        }
        None
    }

    fn put(&self, key: String, result: EvaluationResult) {
        let mut inner = self.inner.lock().expect("cache lock poisoned");
        let replaced = inner
            .map
            .insert(
                key.clone(),
                CacheEntry {
                    result,
                    inserted_at: Instant::now(),
                },
            )
            .is_some();
        if replaced {
            // Re-insertion counts as a fresh insertion for eviction order.
            inner.order.retain(|k| k != &key);
        }
        inner.order.push_back(key);

        while inner.map.len() > self.max_entries {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.map.remove(&oldest);
                }
                None => break,
            }
        }
    }

    fn clear(&self) {
        let mut inner = self.inner.lock().expect("cache lock poisoned");
        inner.map.clear();
        inner.order.clear();
    }

    fn len(&self) -> usize {
        self.inner.lock().expect("cache lock poisoned").map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn result_for(patient_id: &str) -> EvaluationResult {
        EvaluationResult {
            patient_id: patient_id.into(),
            encounter_id: None,
            alerts: vec![],
            suggestions: vec![],
            rules_evaluated: 0,
            rules_fired: 0,
            diagnostics: vec![],
            latency_ms: 1.0,
            evaluated_at: Utc::now(),
        }
    }

    #[test]
    fn insert_and_get() {
        let cache = ResultCache::new(Duration::from_secs(300), 100);
        cache.put("a".into(), result_for("p1"));
        assert_eq!(cache.get("a").unwrap().patient_id, "p1");
        assert!(cache.get("b").is_none());
    }

    #[test]
    fn oldest_inserted_is_evicted_first() {
        let cache = ResultCache::new(Duration::from_secs(300), 2);
        cache.put("a".into(), result_for("p1"));
        cache.put("b".into(), result_for("p2"));
        cache.put("c".into(), result_for("p3"));

        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
        assert!(cache.get("c").is_some());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn expired_entries_miss_and_are_dropped() {
        let cache = ResultCache::new(Duration::ZERO, 100);
        cache.put("a".into(), result_for("p1"));
        assert!(cache.get("a").is_none());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn reinserting_a_key_moves_it_to_the_back_of_eviction_order() {
        let cache = ResultCache::new(Duration::from_secs(300), 2);
        cache.put("a".into(), result_for("p1"));
        cache.put("b".into(), result_for("p2"));
        cache.put("a".into(), result_for("p1"));
        cache.put("c".into(), result_for("p3"));

        // "b" was the oldest insertion after "a" was refreshed.
        assert!(cache.get("b").is_none());
        assert!(cache.get("a").is_some());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = ResultCache::new(Duration::from_secs(300), 100);
        cache.put("a".into(), result_for("p1"));
        cache.put("b".into(), result_for("p2"));
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get("a").is_none());
    }

    #[test]
    fn key_covers_patient_trigger_and_scope_but_not_exclusions() {
        use vigil_core::rule::RuleCategory;

        let base = EvaluationRequest::new("p1", "order-entry");
        let same = EvaluationRequest::new("p1", "order-entry")
            .with_exclusions(vec!["r9".into()]);
        let other_trigger = EvaluationRequest::new("p1", "chart-open");
        let scoped = EvaluationRequest::new("p1", "order-entry")
            .with_scope(vec![RuleCategory::DrugInteraction]);

        assert_eq!(cache_key(&base), cache_key(&same));
        assert_ne!(cache_key(&base), cache_key(&other_trigger));
        assert_ne!(cache_key(&base), cache_key(&scoped));
    }
}
