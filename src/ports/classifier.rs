//! Classifier port: a pretrained multi-class probability model.
//!
//! This trait abstracts the trained artifact from the statistical adapter.

/// Errors raised by a classifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifierError {
    #[error("Expected {expected} features, got {actual}")]
    FeatureCountMismatch { expected: usize, actual: usize },

    #[error("Invalid model: {0}")]
    InvalidModel(String),
}

/// Trait for pretrained classifiers.
///
/// Prediction must be free of side effects so one instance can serve
/// concurrent diagnoses.
pub trait Classifier: Send + Sync {
    /// Training feature columns, in the order `predict_proba` expects.
    fn feature_names(&self) -> &[String];

    /// Class labels, in the order of `predict_proba`'s output.
    fn classes(&self) -> &[String];

    /// Probability per class (each in `[0, 1]`, summing to 1).
    ///
    /// # Errors
    /// Returns `ClassifierError::FeatureCountMismatch` if `features` does not
    /// have one value per feature column.
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError>;
}
