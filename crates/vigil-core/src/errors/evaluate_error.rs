/// Per-rule evaluation failures.
///
/// A failure never aborts the request: the orchestrator demotes the rule to
/// "did not fire" and surfaces the failure in the result's diagnostics list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluateError {
    #[error("comparator {comparator} cannot apply to {value_kind} value")]
    ComparatorMismatch {
        comparator: String,
        value_kind: String,
    },

    #[error("comparator {comparator} requires a comparison value")]
    MissingValue { comparator: String },

    #[error("evaluation task failed: {reason}")]
    TaskFailed { reason: String },
}
