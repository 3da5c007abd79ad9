//! Rule engine adapter: Implementation of EvidenceSource over the
//! forward-chaining engine.
//!
//! # Mutex Behavior
//!
//! The engine's working memory is mutable, so one engine instance serves
//! one diagnosis at a time behind a `Mutex`. A poisoned mutex (from a panic
//! in another thread) fails closed for that invocation by returning
//! `RuleError::Poisoned`; the diagnosis service then degrades to
//! classifier-only evidence.

mod engine;

use std::sync::{Arc, Mutex};

use crate::domain::{ConfidenceMap, EvidenceKind, RuleBase, SymptomSet};
use crate::ports::{EvidenceError, EvidenceSource, RuleError};

pub use engine::{DiseaseFact, RuleEngine};

/// Evidence source backed by the expert rule base.
pub struct RuleEvidence {
    engine: Mutex<RuleEngine>,
}

impl RuleEvidence {
    /// Create an evidence source with its own engine instance.
    #[must_use]
    pub fn new(rules: Arc<RuleBase>, cycle_limit: usize) -> Self {
        tracing::info!(
            "Initializing rule engine ({} rules, cycle limit {})",
            rules.len(),
            cycle_limit
        );
        Self {
            engine: Mutex::new(RuleEngine::new(rules, cycle_limit)),
        }
    }
}

impl EvidenceSource for RuleEvidence {
    fn kind(&self) -> EvidenceKind {
        EvidenceKind::Symbolic
    }

    fn score(&self, symptoms: &SymptomSet) -> Result<ConfidenceMap, EvidenceError> {
        let mut engine = self.engine.lock().map_err(|_| RuleError::Poisoned)?;

        engine.reset();

        for symptom in symptoms.iter() {
            if let Err(e) = engine.assert_fact(symptom) {
                tracing::warn!("Skipping symptom assertion: {e}");
            }
        }

        let fired = engine.run()?;
        tracing::debug!("Rule engine reached fixpoint after {fired} firings");

        // Strongest single rule wins; certainty factors are not combined.
        let mut map = ConfidenceMap::new();
        for fact in engine.disease_facts() {
            map.insert_max(fact.disease.as_str(), fact.certainty * 100.0);
        }

        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipped_rules() -> Arc<RuleBase> {
        let text = std::fs::read_to_string("models/rules.json").expect("read rules");
        Arc::new(RuleBase::from_json(&text).expect("shipped rules are valid"))
    }

    #[test]
    fn test_converts_certainty_to_percent() {
        let evidence = RuleEvidence::new(shipped_rules(), 1000);
        let set: SymptomSet = ["yellow-leaf-curling"].into_iter().collect();
        let map = evidence.score(&set).expect("score");
        assert!((map.get("tomato-yellow-leaf-curl-virus") - 90.0).abs() < 1e-9);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_keeps_maximum_certainty() {
        let evidence = RuleEvidence::new(shipped_rules(), 1000);
        let set: SymptomSet = ["yellow-leaf-curling", "stunted-growth"].into_iter().collect();
        let map = evidence.score(&set).expect("score");
        // 0.95 and 0.9 both fire; the maximum is kept.
        assert!((map.get("tomato-yellow-leaf-curl-virus") - 95.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_state_leaks_between_invocations() {
        let evidence = RuleEvidence::new(shipped_rules(), 1000);
        let wilt: SymptomSet = ["wilting", "vascular-browning", "lower-leaf-yellowing"]
            .into_iter()
            .collect();
        let curl: SymptomSet = ["yellow-leaf-curling"].into_iter().collect();

        let first = evidence.score(&wilt).expect("score");
        let other = evidence.score(&curl).expect("score");
        let second = evidence.score(&wilt).expect("score");

        assert_eq!(first, second);
        assert!(!other.contains("fusarium-wilt"));
        assert!((first.get("fusarium-wilt") - 85.0).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_symptom_is_skipped() {
        let evidence = RuleEvidence::new(shipped_rules(), 1000);
        let set: SymptomSet = ["root-galls", "bad symptom"].into_iter().collect();
        let map = evidence.score(&set).expect("malformed facts are not fatal");
        assert!((map.get("root-knot-nematode") - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_engine_failure_is_an_error() {
        let evidence = RuleEvidence::new(shipped_rules(), 1);
        let set: SymptomSet = ["wilting", "vascular-browning"].into_iter().collect();
        let err = evidence.score(&set).expect_err("cycle limit must surface");
        assert!(matches!(
            err,
            EvidenceError::RuleEngine(RuleError::CycleLimitExceeded(1))
        ));
    }
}
