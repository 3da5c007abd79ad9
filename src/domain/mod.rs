//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no I/O.
//! All types are serializable and implement strict validation.

mod advice;
mod confidence;
mod diagnosis;
pub mod rules;
mod symptom;

pub use advice::{CareAdvice, PLACEHOLDER_TEXT};
pub use confidence::ConfidenceMap;
pub use diagnosis::{
    ConfidenceTier, DiagnosisResult, EvidenceKind, Outcome, ResultList, HEALTHY, NO_MATCH,
};
pub use rules::{Conclusion, Rule, RuleBase};
pub use symptom::{display_name, SymptomSet, SymptomVocabulary, VocabularyError};
