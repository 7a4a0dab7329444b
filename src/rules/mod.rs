//! Rule evaluation over detection results.

pub mod evaluator;

pub use evaluator::{evaluate, VerdictEvaluator};
