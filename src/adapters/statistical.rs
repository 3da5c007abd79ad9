//! Statistical evidence adapter: a trained classifier as an EvidenceSource.
//!
//! The symptom vocabulary is bound to the classifier at construction time:
//! the adapter refuses to exist if the vocabulary does not list exactly the
//! classifier's training columns in the same order.

use std::sync::Arc;

use crate::domain::{ConfidenceMap, EvidenceKind, SymptomSet, SymptomVocabulary};
use crate::ports::{Classifier, EvidenceError, EvidenceSource};
use crate::PhytotrustError;

/// Evidence source backed by a pretrained classifier.
pub struct StatisticalEvidence {
    classifier: Arc<dyn Classifier>,
    vocabulary: SymptomVocabulary,
}

impl StatisticalEvidence {
    /// Bind a classifier to the vocabulary it was trained on.
    ///
    /// # Errors
    /// Returns `PhytotrustError::ResourceUnavailable` when the vocabulary
    /// and the classifier's feature columns differ in content or order.
    pub fn new(
        classifier: Arc<dyn Classifier>,
        vocabulary: SymptomVocabulary,
    ) -> Result<Self, PhytotrustError> {
        let columns = classifier.feature_names();
        if columns != vocabulary.names() {
            let first_diff = columns
                .iter()
                .zip(vocabulary.names())
                .position(|(a, b)| a != b)
                .unwrap_or_else(|| columns.len().min(vocabulary.len()));
            return Err(PhytotrustError::unavailable(
                "classifier",
                format!(
                    "symptom vocabulary ({} columns) does not match classifier training columns ({} columns); first difference at column {first_diff}",
                    vocabulary.len(),
                    columns.len()
                ),
            ));
        }

        Ok(Self {
            classifier,
            vocabulary,
        })
    }

    /// Bind a classifier using its own feature columns as the vocabulary.
    ///
    /// # Errors
    /// Returns `PhytotrustError::ResourceUnavailable` if the columns do not
    /// form a valid vocabulary.
    pub fn from_classifier(classifier: Arc<dyn Classifier>) -> Result<Self, PhytotrustError> {
        let vocabulary = SymptomVocabulary::new(classifier.feature_names().iter().cloned())
            .map_err(|e| PhytotrustError::unavailable("classifier", e))?;
        Self::new(classifier, vocabulary)
    }

    #[must_use]
    pub fn vocabulary(&self) -> &SymptomVocabulary {
        &self.vocabulary
    }
}

impl EvidenceSource for StatisticalEvidence {
    fn kind(&self) -> EvidenceKind {
        EvidenceKind::Statistical
    }

    fn score(&self, symptoms: &SymptomSet) -> Result<ConfidenceMap, EvidenceError> {
        for unknown in self.vocabulary.unknown(symptoms) {
            tracing::debug!("Symptom {unknown:?} is not a classifier feature; ignored");
        }

        let features = self.vocabulary.feature_vector(symptoms);
        let proba = self.classifier.predict_proba(&features)?;

        let classes = self.classifier.classes();
        if proba.len() != classes.len() {
            return Err(EvidenceError::ModelUnavailable(format!(
                "classifier returned {} probabilities for {} classes",
                proba.len(),
                classes.len()
            )));
        }
        if let Some(bad) = proba.iter().find(|p| !p.is_finite()) {
            return Err(EvidenceError::ModelUnavailable(format!(
                "classifier returned non-finite probability {bad}"
            )));
        }

        Ok(classes
            .iter()
            .zip(proba)
            .map(|(class, p)| (class.as_str(), p * 100.0))
            .collect())
    }
}
