use serde::{Deserialize, Serialize};

use crate::constants::MAX_PRIORITY_SCORE;

/// Four-component priority breakdown attached to a scored alert.
///
/// The components can in principle sum above 100; the total is capped,
/// not rescaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityScore {
    /// Severity tier component (0–40).
    pub severity: u32,
    /// Vitals-driven urgency component (0–30).
    pub urgency: u32,
    /// Category impact component (0–20).
    pub impact: u32,
    /// Evidence confidence component (0–10).
    pub confidence: u32,
    /// Capped sum of the four components.
    pub total: u32,
}

impl PriorityScore {
    pub fn new(severity: u32, urgency: u32, impact: u32, confidence: u32) -> Self {
        let total = (severity + urgency + impact + confidence).min(MAX_PRIORITY_SCORE);
        Self {
            severity,
            urgency,
            impact,
            confidence,
            total,
        }
    }
}
