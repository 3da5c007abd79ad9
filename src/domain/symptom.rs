//! Symptom selections and the ordered symptom vocabulary.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A set of unique symptom identifiers observed on a plant.
///
/// Order of insertion never affects a diagnosis; iteration is sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymptomSet(BTreeSet<String>);

impl SymptomSet {
    /// Create an empty selection (the "healthy" state).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symptom; returns `false` when it was already present.
    pub fn insert(&mut self, symptom: impl Into<String>) -> bool {
        self.0.insert(symptom.into())
    }

    /// Remove a symptom; returns `false` when it was not selected.
    pub fn remove(&mut self, symptom: &str) -> bool {
        self.0.remove(symptom)
    }

    #[must_use]
    pub fn contains(&self, symptom: &str) -> bool {
        self.0.contains(symptom)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for SymptomSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Errors raised while building a vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VocabularyError {
    #[error("Symptom vocabulary is empty")]
    Empty,

    #[error("Duplicate symptom in vocabulary: {0}")]
    Duplicate(String),

    #[error("Blank symptom at column {0}")]
    Blank(usize),
}

/// The fixed, ordered list of symptoms a classifier was trained on.
///
/// Position `i` of a feature vector corresponds to `names()[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomVocabulary {
    names: Vec<String>,
}

impl SymptomVocabulary {
    /// Build a vocabulary from training column names, preserving their order.
    ///
    /// # Errors
    /// Returns an error for an empty list, blank names or duplicates.
    pub fn new<I, S>(names: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(VocabularyError::Empty);
        }

        let mut seen = BTreeSet::new();
        for (i, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(VocabularyError::Blank(i));
            }
            if !seen.insert(name.as_str()) {
                return Err(VocabularyError::Duplicate(name.clone()));
            }
        }

        Ok(Self { names })
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[must_use]
    pub fn contains(&self, symptom: &str) -> bool {
        self.names.iter().any(|n| n == symptom)
    }

    /// One-hot encode a selection: 1.0 where the symptom is present, else 0.0.
    #[must_use]
    pub fn feature_vector(&self, symptoms: &SymptomSet) -> Vec<f64> {
        self.names
            .iter()
            .map(|n| if symptoms.contains(n) { 1.0 } else { 0.0 })
            .collect()
    }

    /// Symptoms in the selection that the classifier has never seen.
    pub fn unknown<'a>(&'a self, symptoms: &'a SymptomSet) -> impl Iterator<Item = &'a str> + 'a {
        symptoms.iter().filter(move |s| !self.contains(s))
    }
}

/// Render an identifier like `yellow-leaf-curling` as `Yellow Leaf Curling`.
#[must_use]
pub fn display_name(identifier: &str) -> String {
    identifier
        .split('-')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symptom_set_deduplicates() {
        let mut set = SymptomSet::new();
        assert!(set.insert("wilting"));
        assert!(!set.insert("wilting"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_symptom_set_order_independent() {
        let a: SymptomSet = ["wilting", "root-galls"].into_iter().collect();
        let b: SymptomSet = ["root-galls", "wilting"].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_feature_vector_follows_vocabulary_order() {
        let vocab = SymptomVocabulary::new(["a", "b", "c"]).expect("valid vocabulary");
        let set: SymptomSet = ["c", "a"].into_iter().collect();
        assert_eq!(vocab.feature_vector(&set), vec![1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_vocabulary_rejects_duplicates_and_blanks() {
        assert_eq!(
            SymptomVocabulary::new(["a", "a"]),
            Err(VocabularyError::Duplicate("a".into()))
        );
        assert_eq!(SymptomVocabulary::new(["a", " "]), Err(VocabularyError::Blank(1)));
        assert_eq!(
            SymptomVocabulary::new(Vec::<String>::new()),
            Err(VocabularyError::Empty)
        );
    }

    #[test]
    fn test_unknown_symptoms() {
        let vocab = SymptomVocabulary::new(["a", "b"]).expect("valid vocabulary");
        let set: SymptomSet = ["a", "zzz"].into_iter().collect();
        assert_eq!(vocab.unknown(&set).collect::<Vec<_>>(), vec!["zzz"]);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(
            display_name("tomato-yellow-leaf-curl-virus"),
            "Tomato Yellow Leaf Curl Virus"
        );
        assert_eq!(display_name("healthy"), "Healthy");
    }
}
