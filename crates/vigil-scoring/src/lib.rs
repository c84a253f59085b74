//! # vigil-scoring
//!
//! Deterministic, side-effect-free priority scoring.
//!
//! Four independent components — severity, urgency, impact, confidence —
//! sum into a 0–100 score (capped, not rescaled) used to rank alerts for
//! display.

pub mod priority;

pub use priority::{rank, score};
