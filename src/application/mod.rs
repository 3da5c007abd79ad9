//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use case of the application: diagnosing a symptom selection.

mod diagnosis;
mod fusion;

pub use diagnosis::DiagnosisService;
pub use fusion::{FusionEngine, FTS_FLOOR, ML_WEIGHT, RULE_WEIGHT};
