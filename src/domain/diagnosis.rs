//! Diagnosis result types.
//!
//! Represents the output of fusing statistical and rule-based evidence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::advice::CareAdvice;
use super::symptom::display_name;

/// Identifier of the pseudo-disease reported for an empty selection.
pub const HEALTHY: &str = "healthy";

/// Identifier of the sentinel row reported when nothing clears the floor.
pub const NO_MATCH: &str = "no-match";

/// Confidence tier derived from the Final Trust Score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    /// FTS below 40
    Low,
    /// FTS in [40, 75)
    Medium,
    /// FTS of 75 or more
    High,
}

impl ConfidenceTier {
    /// Lower bound (inclusive) of the high tier.
    pub const HIGH_THRESHOLD: f64 = 75.0;

    /// Lower bound (inclusive) of the medium tier.
    pub const MEDIUM_THRESHOLD: f64 = 40.0;

    /// Classify a Final Trust Score.
    #[must_use]
    pub fn from_score(fts: f64) -> Self {
        if fts >= Self::HIGH_THRESHOLD {
            Self::High
        } else if fts >= Self::MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Weak evidence - keep observing",
            Self::Medium => "Moderate evidence - inspect closely",
            Self::High => "Strong evidence - act on the guidance",
        }
    }

    /// Get the associated color for TUI display (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Low => (244, 63, 94),      // Rose (#F43F5E)
            Self::Medium => (251, 191, 36),  // Amber (#FBBF24)
            Self::High => (16, 185, 129),    // Emerald (#10B981)
        }
    }
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// What kind of row a [`DiagnosisResult`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// A disease supported by fused evidence
    Diagnosed,
    /// No symptoms were selected
    Healthy,
    /// Symptoms were selected but no disease cleared the floor
    NoMatch,
}

/// One row of a diagnosis.
///
/// Immutable once constructed; the sentinel row carries no scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    disease: String,
    outcome: Outcome,
    ml_confidence: Option<f64>,
    rule_confidence: Option<f64>,
    final_trust_score: Option<f64>,
    tier: ConfidenceTier,
    advice: CareAdvice,
}

impl DiagnosisResult {
    /// A disease row. The tier is derived from `final_trust_score`.
    #[must_use]
    pub fn diagnosed(
        disease: impl Into<String>,
        ml_confidence: f64,
        rule_confidence: f64,
        final_trust_score: f64,
        advice: CareAdvice,
    ) -> Self {
        Self {
            disease: disease.into(),
            outcome: Outcome::Diagnosed,
            ml_confidence: Some(ml_confidence),
            rule_confidence: Some(rule_confidence),
            final_trust_score: Some(final_trust_score),
            tier: ConfidenceTier::from_score(final_trust_score),
            advice,
        }
    }

    /// The synthetic healthy row: every score is 100.
    #[must_use]
    pub fn healthy(advice: CareAdvice) -> Self {
        Self {
            disease: HEALTHY.to_string(),
            outcome: Outcome::Healthy,
            ml_confidence: Some(100.0),
            rule_confidence: Some(100.0),
            final_trust_score: Some(100.0),
            tier: ConfidenceTier::High,
            advice,
        }
    }

    /// The "no match" sentinel: scores are unavailable.
    #[must_use]
    pub fn no_match(advice: CareAdvice) -> Self {
        Self {
            disease: NO_MATCH.to_string(),
            outcome: Outcome::NoMatch,
            ml_confidence: None,
            rule_confidence: None,
            final_trust_score: None,
            tier: ConfidenceTier::Low,
            advice,
        }
    }

    #[must_use]
    pub fn disease(&self) -> &str {
        &self.disease
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        display_name(&self.disease)
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[must_use]
    pub fn ml_confidence(&self) -> Option<f64> {
        self.ml_confidence
    }

    #[must_use]
    pub fn rule_confidence(&self) -> Option<f64> {
        self.rule_confidence
    }

    #[must_use]
    pub fn final_trust_score(&self) -> Option<f64> {
        self.final_trust_score
    }

    #[must_use]
    pub fn tier(&self) -> ConfidenceTier {
        self.tier
    }

    #[must_use]
    pub fn advice(&self) -> &CareAdvice {
        &self.advice
    }

    #[must_use]
    pub fn treatment(&self) -> &str {
        &self.advice.treatment
    }

    #[must_use]
    pub fn prevention(&self) -> &str {
        &self.advice.prevention
    }
}

/// Which evidence source produced a confidence map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceKind {
    /// The trained classifier
    Statistical,
    /// The expert rule base
    Symbolic,
}

impl std::fmt::Display for EvidenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Statistical => write!(f, "classifier"),
            Self::Symbolic => write!(f, "rule engine"),
        }
    }
}

/// Ordered diagnosis rows for one invocation. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultList {
    rows: Vec<DiagnosisResult>,
    degraded_sources: Vec<EvidenceKind>,
    diagnosed_at: DateTime<Utc>,
}

impl ResultList {
    /// Wrap rows that are already sorted. `rows` must not be empty.
    pub(crate) fn new(rows: Vec<DiagnosisResult>) -> Self {
        debug_assert!(!rows.is_empty(), "a result list always has a row");
        Self {
            rows,
            degraded_sources: Vec::new(),
            diagnosed_at: Utc::now(),
        }
    }

    /// Record that an evidence source contributed nothing this time.
    #[must_use]
    pub fn with_degraded(mut self, mut sources: Vec<EvidenceKind>) -> Self {
        sources.sort();
        sources.dedup();
        self.degraded_sources = sources;
        self
    }

    #[must_use]
    pub fn rows(&self) -> &[DiagnosisResult] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiagnosisResult> {
        self.rows.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The highest-ranked row.
    #[must_use]
    pub fn top(&self) -> Option<&DiagnosisResult> {
        self.rows.first()
    }

    #[must_use]
    pub fn degraded_sources(&self) -> &[EvidenceKind] {
        &self.degraded_sources
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.degraded_sources.is_empty()
    }

    #[must_use]
    pub fn diagnosed_at(&self) -> DateTime<Utc> {
        self.diagnosed_at
    }
}

impl<'a> IntoIterator for &'a ResultList {
    type Item = &'a DiagnosisResult;
    type IntoIter = std::slice::Iter<'a, DiagnosisResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
