//! Diagnosis service: Orchestrates evidence gathering and fusion.
//!
//! This service coordinates:
//! - Statistical evidence (classifier)
//! - Symbolic evidence (rule engine)
//! - Fusion into a ranked, tiered result list
//!
//! A failing evidence source never fails the diagnosis: the failure is
//! logged, the source contributes zero everywhere, and the result list
//! records which source was degraded.

use std::sync::Arc;

use crate::adapters::{ResourceBundle, RuleEvidence, StatisticalEvidence};
use crate::application::FusionEngine;
use crate::config::EngineConfig;
use crate::domain::{ConfidenceMap, EvidenceKind, ResultList, SymptomSet, SymptomVocabulary};
use crate::ports::{EvidenceError, EvidenceSource, ReferenceData};
use crate::{PhytotrustError, Result};

/// Hybrid diagnosis over two evidence sources.
pub struct DiagnosisService {
    statistical: Arc<dyn EvidenceSource>,
    symbolic: Arc<dyn EvidenceSource>,
    fusion: FusionEngine,
    vocabulary: SymptomVocabulary,
    parallel: bool,
}

impl DiagnosisService {
    /// Compose a service from already constructed parts.
    #[must_use]
    pub fn new(
        statistical: Arc<dyn EvidenceSource>,
        symbolic: Arc<dyn EvidenceSource>,
        reference: Arc<dyn ReferenceData>,
        vocabulary: SymptomVocabulary,
        parallel: bool,
    ) -> Self {
        Self {
            statistical,
            symbolic,
            fusion: FusionEngine::new(reference),
            vocabulary,
            parallel,
        }
    }

    /// Load every resource from the configured model directory.
    ///
    /// # Errors
    /// Returns `PhytotrustError::ResourceUnavailable` if the classifier, rule
    /// base, vocabulary or reference table cannot be loaded or verified.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        tracing::info!("Initializing diagnosis service from {:?}...", config.model_dir);

        let bundle = ResourceBundle::open(&config.model_dir, config.require_manifest)?;

        let classifier = Arc::new(bundle.load_classifier()?);
        let statistical = match bundle.load_training_columns()? {
            Some(columns) => {
                let vocabulary = SymptomVocabulary::new(columns)
                    .map_err(|e| PhytotrustError::unavailable("symptoms.csv", e))?;
                StatisticalEvidence::new(classifier, vocabulary)?
            }
            None => {
                tracing::debug!("No training data header; using classifier columns as vocabulary");
                StatisticalEvidence::from_classifier(classifier)?
            }
        };
        let vocabulary = statistical.vocabulary().clone();

        let rules = Arc::new(bundle.load_rules()?);
        let symbolic = RuleEvidence::new(rules, config.rule_cycle_limit);

        let reference = bundle.load_reference()?;

        tracing::info!(
            "Diagnosis service ready ({} symptoms, parallel evidence: {})",
            vocabulary.len(),
            config.parallel_evidence
        );

        Ok(Self::new(
            Arc::new(statistical),
            Arc::new(symbolic),
            Arc::new(reference),
            vocabulary,
            config.parallel_evidence,
        ))
    }

    /// Symptoms the front-ends may offer, in training order.
    #[must_use]
    pub fn vocabulary(&self) -> &SymptomVocabulary {
        &self.vocabulary
    }

    /// Diagnose a symptom selection. Never fails.
    pub fn diagnose(&self, symptoms: &SymptomSet) -> ResultList {
        if symptoms.is_empty() {
            return self
                .fusion
                .fuse(&ConfidenceMap::new(), &ConfidenceMap::new(), symptoms);
        }

        tracing::debug!("Diagnosing {} symptoms", symptoms.len());

        let (ml, rules) = if self.parallel {
            std::thread::scope(|s| {
                let ml = s.spawn(|| self.statistical.score(symptoms));
                let rules = self.symbolic.score(symptoms);
                let ml = ml.join().unwrap_or_else(|_| {
                    Err(EvidenceError::ModelUnavailable("classifier thread panicked".into()))
                });
                (ml, rules)
            })
        } else {
            (
                self.statistical.score(symptoms),
                self.symbolic.score(symptoms),
            )
        };

        let mut degraded = Vec::new();
        let ml = Self::accept(self.statistical.kind(), ml, &mut degraded);
        let rules = Self::accept(self.symbolic.kind(), rules, &mut degraded);

        let list = self.fusion.fuse(&ml, &rules, symptoms).with_degraded(degraded);

        if let Some(top) = list.top() {
            tracing::info!(
                "Diagnosis complete: top={}, fts={:?}, tier={}, rows={}",
                top.disease(),
                top.final_trust_score(),
                top.tier(),
                list.len()
            );
        }

        list
    }

    /// Clear the selection: the same as diagnosing no symptoms.
    pub fn reset(&self) -> ResultList {
        self.diagnose(&SymptomSet::new())
    }

    fn accept(
        kind: EvidenceKind,
        outcome: std::result::Result<ConfidenceMap, EvidenceError>,
        degraded: &mut Vec<EvidenceKind>,
    ) -> ConfidenceMap {
        match outcome {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("Evidence from {kind} unavailable, contributing zero: {e}");
                degraded.push(kind);
                ConfidenceMap::new()
            }
        }
    }
}
