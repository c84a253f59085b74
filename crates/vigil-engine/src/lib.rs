//! # vigil-engine
//!
//! The evaluation orchestrator and its two shared-state collaborators.
//!
//! Per request: cache check → rule selection → concurrent rule fan-out
//! (conditions fan out concurrently within each rule) → fan-in → suppression
//! → scoring → stable ranking → result assembly → metrics → history →
//! optional cache. A failure in one rule never aborts the request.

pub mod cache;
pub mod engine;
pub mod metrics;

pub use cache::{cache_key, ResultCache};
pub use engine::AlertEngine;
pub use metrics::MetricsRecorder;
