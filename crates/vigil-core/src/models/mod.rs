pub mod alert;
pub mod metrics;
pub mod priority;
pub mod request;
pub mod result;
pub mod suppression_rule;

pub use alert::{Alert, AlertEvidence, AlertStatus};
pub use metrics::MetricsSnapshot;
pub use priority::PriorityScore;
pub use request::EvaluationRequest;
pub use result::{EvaluationResult, RuleDiagnostic, Suggestion};
pub use suppression_rule::SuppressionRule;
