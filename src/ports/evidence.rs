//! Evidence source port: one independent opinion about a symptom selection.
//!
//! The fusion engine only sees this trait, never the classifier or the
//! rule engine behind it.

use crate::domain::{ConfidenceMap, EvidenceKind, SymptomSet};
use crate::ports::ClassifierError;

/// Errors that can occur while a source scores a selection.
///
/// These never reach the presentation layer: the diagnosis service logs
/// them and treats the source as contributing zero confidence.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EvidenceError {
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Classifier failed: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("Rule engine failed: {0}")]
    RuleEngine(#[from] RuleError),
}

/// Errors raised by the forward-chaining rule engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("Malformed fact: {0}")]
    MalformedFact(String),

    #[error("Inference exceeded {0} rule firings")]
    CycleLimitExceeded(usize),

    #[error("Rule engine lock poisoned")]
    Poisoned,
}

/// Trait for evidence sources.
///
/// Implementations must be safe to call from several threads; any internal
/// mutable state is serialized by the implementation itself.
pub trait EvidenceSource: Send + Sync {
    /// Which kind of evidence this source produces.
    fn kind(&self) -> EvidenceKind;

    /// Score a selection, returning a confidence in `[0, 100]` per disease.
    ///
    /// # Errors
    /// Returns an error when the source cannot produce an opinion at all.
    /// An empty map is a valid opinion ("no support for any disease").
    fn score(&self, symptoms: &SymptomSet) -> Result<ConfidenceMap, EvidenceError>;
}
