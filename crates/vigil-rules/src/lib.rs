//! # vigil-rules
//!
//! Rule catalog and condition evaluation.
//!
//! The catalog validates rules in bulk at load time and hands out the
//! applicable subset per request. The evaluator dispatches on predicate kind,
//! applies lookback windows, and folds condition results left-to-right with
//! each condition's own logical operator.

pub mod catalog;
pub mod evaluate;

pub use catalog::{LoadOutcome, RuleCatalog};
pub use evaluate::{evaluate_condition, evaluate_rule, fold_results};
