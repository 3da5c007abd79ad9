//! Per-disease confidence produced by one evidence source.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mapping of disease identifier to a confidence percentage in `[0, 100]`.
///
/// A disease absent from the map has confidence 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfidenceMap(BTreeMap<String, f64>);

impl ConfidenceMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the confidence for a disease, clamped into `[0, 100]`.
    ///
    /// Non-finite values are stored as 0.
    pub fn insert(&mut self, disease: impl Into<String>, confidence: f64) {
        self.0.insert(disease.into(), clamp_percent(confidence));
    }

    /// Keep the larger of the stored and the offered confidence.
    pub fn insert_max(&mut self, disease: impl Into<String>, confidence: f64) {
        let confidence = clamp_percent(confidence);
        self.0
            .entry(disease.into())
            .and_modify(|c| *c = c.max(confidence))
            .or_insert(confidence);
    }

    /// Confidence for a disease, 0 when missing.
    #[must_use]
    pub fn get(&self, disease: &str) -> f64 {
        self.0.get(disease).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn contains(&self, disease: &str) -> bool {
        self.0.contains_key(disease)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn diseases(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ConfidenceMap {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (disease, confidence) in iter {
            map.insert(disease, confidence);
        }
        map
    }
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_is_zero() {
        let map = ConfidenceMap::new();
        assert_eq!(map.get("late-blight"), 0.0);
    }

    #[test]
    fn test_insert_max_keeps_strongest() {
        let mut map = ConfidenceMap::new();
        map.insert_max("leaf-mold", 60.0);
        map.insert_max("leaf-mold", 85.0);
        map.insert_max("leaf-mold", 70.0);
        assert_eq!(map.get("leaf-mold"), 85.0);
    }

    #[test]
    fn test_values_are_clamped() {
        let map: ConfidenceMap = [("a", 140.0), ("b", -3.0), ("c", f64::NAN)]
            .into_iter()
            .collect();
        assert_eq!(map.get("a"), 100.0);
        assert_eq!(map.get("b"), 0.0);
        assert_eq!(map.get("c"), 0.0);
    }
}
