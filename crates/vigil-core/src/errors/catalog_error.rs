/// Rule validation errors raised at catalog load time.
///
/// Never fatal: an invalid rule is rejected from the active set and counted,
/// and the engine keeps serving with the remaining rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("rule has no id")]
    MissingId,

    #[error("rule {rule_id} has no name")]
    MissingName { rule_id: String },

    #[error("rule {rule_id} has an unrecognized category")]
    UnknownCategory { rule_id: String },

    #[error("rule {rule_id} has no conditions")]
    NoConditions { rule_id: String },

    #[error("rule {rule_id} condition {index}: {reason}")]
    InvalidCondition {
        rule_id: String,
        index: usize,
        reason: String,
    },
}
