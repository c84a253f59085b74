//! Left-fold combination of condition results.

use vigil_core::rule::LogicOp;

/// Fold condition results left-to-right: the accumulator starts at the first
/// result, then each subsequent result joins it with *that condition's own*
/// operator. The first operator is ignored. An empty slice folds to false.
pub fn fold_results(results: &[(LogicOp, bool)]) -> bool {
    let Some(((_, first), rest)) = results.split_first() else {
        return false;
    };
    rest.iter().fold(*first, |acc, (op, result)| match op {
        LogicOp::And => acc && *result,
        LogicOp::Or => acc || *result,
    })
}
