//! Fusion engine: blends statistical and symbolic evidence.
//!
//! For each candidate disease the Final Trust Score is
//! `FTS = 0.6 * ml + 0.4 * rule` on a 0-100 scale. Candidates below the
//! floor are dropped; survivors are ranked and tiered on the reported
//! (one-decimal) score.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::{ConfidenceMap, DiagnosisResult, ResultList, SymptomSet, HEALTHY, NO_MATCH};
use crate::ports::ReferenceData;

/// Weight of the classifier probability.
pub const ML_WEIGHT: f64 = 0.6;

/// Weight of the rule-engine certainty.
pub const RULE_WEIGHT: f64 = 0.4;

/// Minimum raw FTS for a disease to be reported.
pub const FTS_FLOOR: f64 = 0.1;

/// Round to one decimal place.
fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Stateless fusion of two confidence maps into a ranked result list.
#[derive(Clone)]
pub struct FusionEngine {
    reference: Arc<dyn ReferenceData>,
}

impl FusionEngine {
    #[must_use]
    pub fn new(reference: Arc<dyn ReferenceData>) -> Self {
        Self { reference }
    }

    /// Final Trust Score before rounding.
    #[must_use]
    pub fn final_trust_score(ml: f64, rule: f64) -> f64 {
        ML_WEIGHT * ml + RULE_WEIGHT * rule
    }

    /// Fuse per-disease evidence for one symptom selection.
    ///
    /// An empty selection short-circuits to the healthy row regardless of
    /// the maps. Otherwise the result holds every non-healthy disease whose
    /// FTS clears the floor, or the no-match sentinel if none does.
    #[must_use]
    pub fn fuse(&self, ml: &ConfidenceMap, rules: &ConfidenceMap, symptoms: &SymptomSet) -> ResultList {
        if symptoms.is_empty() {
            return ResultList::new(vec![DiagnosisResult::healthy(self.reference.lookup(HEALTHY))]);
        }

        let candidates: BTreeSet<&str> = ml
            .diseases()
            .chain(rules.diseases())
            .filter(|d| *d != HEALTHY)
            .collect();

        let mut rows: Vec<DiagnosisResult> = candidates
            .into_iter()
            .filter_map(|disease| {
                let ml_conf = ml.get(disease);
                let rule_conf = rules.get(disease);
                let fts = Self::final_trust_score(ml_conf, rule_conf);
                (fts >= FTS_FLOOR).then(|| {
                    DiagnosisResult::diagnosed(
                        disease,
                        ml_conf,
                        rule_conf,
                        round1(fts),
                        self.reference.lookup(disease),
                    )
                })
            })
            .collect();

        if rows.is_empty() {
            tracing::debug!("No disease cleared the FTS floor");
            return ResultList::new(vec![DiagnosisResult::no_match(self.reference.lookup(NO_MATCH))]);
        }

        rows.sort_by(|a, b| {
            let (fa, fb) = (
                a.final_trust_score().unwrap_or(0.0),
                b.final_trust_score().unwrap_or(0.0),
            );
            fb.partial_cmp(&fa)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.disease().cmp(b.disease()))
        });

        ResultList::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::reference::StaticReferenceTable;
    use crate::domain::{ConfidenceTier, Outcome};

    fn engine() -> FusionEngine {
        FusionEngine::new(Arc::new(StaticReferenceTable::builtin()))
    }

    fn symptoms(items: &[&str]) -> SymptomSet {
        items.iter().copied().collect()
    }

    fn map(items: &[(&str, f64)]) -> ConfidenceMap {
        items.iter().copied().collect()
    }

    #[test]
    fn test_empty_selection_is_healthy() {
        let ml = map(&[("late-blight", 90.0)]);
        let list = engine().fuse(&ml, &ConfidenceMap::new(), &SymptomSet::new());

        assert_eq!(list.len(), 1);
        let row = list.top().expect("row");
        assert_eq!(row.disease(), HEALTHY);
        assert_eq!(row.outcome(), Outcome::Healthy);
        assert_eq!(row.final_trust_score(), Some(100.0));
        assert_eq!(row.ml_confidence(), Some(100.0));
        assert_eq!(row.rule_confidence(), Some(100.0));
        assert_eq!(row.tier(), ConfidenceTier::High);
        assert!(!row.advice().is_placeholder());
    }

    #[test]
    fn test_leaf_curl_example() {
        let ml = map(&[("tomato-yellow-leaf-curl-virus", 82.0), ("healthy", 8.0)]);
        let rules = map(&[("tomato-yellow-leaf-curl-virus", 90.0)]);
        let list = engine().fuse(&ml, &rules, &symptoms(&["yellow-leaf-curling"]));

        let top = list.top().expect("row");
        assert_eq!(top.disease(), "tomato-yellow-leaf-curl-virus");
        assert_eq!(top.final_trust_score(), Some(85.2));
        assert_eq!(top.tier(), ConfidenceTier::High);
        assert!(top.treatment().contains("No cure"));
    }

    #[test]
    fn test_healthy_never_ranked() {
        let ml = map(&[("healthy", 95.0), ("leaf-mold", 5.0)]);
        let list = engine().fuse(&ml, &ConfidenceMap::new(), &symptoms(&["olive-mold-underside"]));
        assert!(list.iter().all(|r| r.disease() != HEALTHY));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_scores_follow_formula() {
        let ml = map(&[("early-blight", 33.3), ("alternaria-leaf-spot", 12.0), ("septoria-leaf-spot", 0.05)]);
        let rules = map(&[("early-blight", 80.0), ("sunscald", 40.0)]);
        let list = engine().fuse(&ml, &rules, &symptoms(&["concentric-ring-spots"]));

        for row in &list {
            let ml = row.ml_confidence().expect("ml");
            let rule = row.rule_confidence().expect("rule");
            let fts = row.final_trust_score().expect("fts");
            assert_eq!(fts, round1(0.6 * ml + 0.4 * rule));
            assert!(fts >= FTS_FLOOR);
        }
        // 0.6 * 0.05 = 0.03 falls below the floor.
        assert!(list.iter().all(|r| r.disease() != "septoria-leaf-spot"));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_sorted_descending_then_by_id() {
        let ml = map(&[("b-disease", 50.0), ("a-disease", 50.0), ("c-disease", 70.0)]);
        let list = engine().fuse(&ml, &ConfidenceMap::new(), &symptoms(&["wilting"]));

        let order: Vec<&str> = list.iter().map(|r| r.disease()).collect();
        assert_eq!(order, vec!["c-disease", "a-disease", "b-disease"]);
    }

    #[test]
    fn test_no_match_sentinel() {
        let ml = map(&[("healthy", 99.0), ("late-blight", 0.1)]);
        let list = engine().fuse(&ml, &ConfidenceMap::new(), &symptoms(&["wilting"]));

        assert_eq!(list.len(), 1);
        let row = list.top().expect("row");
        assert_eq!(row.disease(), NO_MATCH);
        assert_eq!(row.outcome(), Outcome::NoMatch);
        assert_eq!(row.final_trust_score(), None);
        assert_eq!(row.ml_confidence(), None);
        assert_eq!(row.tier(), ConfidenceTier::Low);
        assert_eq!(row.treatment(), "Monitor closely.");
    }

    #[test]
    fn test_floor_applies_to_raw_score() {
        // 0.4 * 0.3 = 0.12 survives; 0.4 * 0.2 = 0.08 does not.
        let rules = map(&[("late-blight", 0.3), ("leaf-mold", 0.2)]);
        let list = engine().fuse(&ConfidenceMap::new(), &rules, &symptoms(&["wilting"]));
        assert_eq!(list.len(), 1);
        let row = list.top().expect("row");
        assert_eq!(row.disease(), "late-blight");
        assert_eq!(row.final_trust_score(), Some(0.1));
    }

    #[test]
    fn test_tier_boundaries() {
        // (ml, rule) pairs whose reported FTS lands on each boundary.
        let cases = [
            (100.0, 37.5, 75.0, ConfidenceTier::High),
            (100.0, 37.25, 74.9, ConfidenceTier::Medium),
            (0.0, 100.0, 40.0, ConfidenceTier::Medium),
            (0.0, 99.75, 39.9, ConfidenceTier::Low),
        ];
        for (ml, rule, fts, expected) in cases {
            let list = engine().fuse(
                &map(&[("x", ml)]),
                &map(&[("x", rule)]),
                &symptoms(&["wilting"]),
            );
            let row = list.top().expect("row");
            assert_eq!(row.final_trust_score(), Some(fts));
            assert_eq!(row.tier(), expected, "fts={fts}");
        }
    }

    #[test]
    fn test_unknown_disease_gets_placeholder_advice() {
        let ml = map(&[("mystery-rot", 60.0)]);
        let list = engine().fuse(&ml, &ConfidenceMap::new(), &symptoms(&["wilting"]));
        let row = list.top().expect("row");
        assert_eq!(row.treatment(), "-");
        assert_eq!(row.prevention(), "-");
    }
}
