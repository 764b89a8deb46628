//! Strategy: trade evaluation.

pub mod evaluator;

pub use evaluator::{classify_rr, classify_zone, evaluate, evaluate_inputs};
