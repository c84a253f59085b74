//! # vigil-suppression
//!
//! Duplicate/fatigue filtering: a per-patient rolling window of previously
//! fired alerts, a token-Jaccard similarity measure with rule-id and
//! category short-circuits, and the per-category suppression filter that
//! consults both.

pub mod filter;
pub mod history;
pub mod similarity;

pub use filter::{default_rules, SuppressionFilter};
pub use history::AlertHistoryStore;
pub use similarity::{alert_similarity, jaccard};
