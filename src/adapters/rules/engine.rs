//! Forward-chaining production rule engine.
//!
//! Working memory holds asserted facts, the disease conclusions reached so
//! far, and the set of rules that already fired. One `run` repeatedly picks
//! the activated rule with the highest salience (earliest declared on ties)
//! that has not fired yet, applies its conclusion, and stops once no
//! activated rule is left. Each rule fires at most once between resets.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::rules::{validate_fact, Conclusion, RuleBase};
use crate::ports::RuleError;

/// A disease concluded by a fired rule.
#[derive(Debug, Clone, PartialEq)]
pub struct DiseaseFact {
    pub disease: String,
    /// Certainty factor in `[0, 1]`.
    pub certainty: f64,
    /// Name of the rule that concluded it.
    pub rule: String,
}

#[derive(Debug, Default)]
struct WorkingMemory {
    facts: BTreeSet<String>,
    diseases: Vec<DiseaseFact>,
    fired: BTreeSet<usize>,
}

/// A rule engine instance over an immutable rule base.
///
/// Not thread-safe by itself: callers sharing an engine must serialize
/// access (see `RuleEvidence`).
#[derive(Debug)]
pub struct RuleEngine {
    rules: Arc<RuleBase>,
    /// Rule indices in firing priority order.
    agenda: Vec<usize>,
    memory: WorkingMemory,
    cycle_limit: usize,
}

impl RuleEngine {
    /// Create an engine with empty working memory.
    #[must_use]
    pub fn new(rules: Arc<RuleBase>, cycle_limit: usize) -> Self {
        let mut agenda: Vec<usize> = (0..rules.rules.len()).collect();
        // Stable sort keeps declaration order among equal salience.
        agenda.sort_by_key(|&i| std::cmp::Reverse(rules.rules[i].salience));

        Self {
            rules,
            agenda,
            memory: WorkingMemory::default(),
            cycle_limit,
        }
    }

    /// Clear all facts, conclusions and refraction state.
    pub fn reset(&mut self) {
        self.memory = WorkingMemory::default();
    }

    /// Assert a fact. Returns `false` if it was already known.
    ///
    /// # Errors
    /// Returns `RuleError::MalformedFact` for empty tokens or tokens holding
    /// whitespace or delimiter characters.
    pub fn assert_fact(&mut self, fact: &str) -> Result<bool, RuleError> {
        validate_fact(fact).map_err(RuleError::MalformedFact)?;
        Ok(self.memory.facts.insert(fact.to_string()))
    }

    /// Fire rules until fixpoint. Returns the number of rules fired.
    ///
    /// # Errors
    /// Returns `RuleError::CycleLimitExceeded` if more than `cycle_limit`
    /// rules would fire in this run.
    pub fn run(&mut self) -> Result<usize, RuleError> {
        let mut fired = 0;

        while let Some(idx) = self.next_activation() {
            if fired >= self.cycle_limit {
                return Err(RuleError::CycleLimitExceeded(self.cycle_limit));
            }

            let rule = &self.rules.rules[idx];
            tracing::trace!("Firing rule {}", rule.name);
            match &rule.then {
                Conclusion::Disease { name, certainty } => {
                    self.memory.diseases.push(DiseaseFact {
                        disease: name.clone(),
                        certainty: *certainty,
                        rule: rule.name.clone(),
                    });
                }
                Conclusion::Fact(fact) => {
                    self.memory.facts.insert(fact.clone());
                }
            }
            self.memory.fired.insert(idx);
            fired += 1;
        }

        Ok(fired)
    }

    fn next_activation(&self) -> Option<usize> {
        self.agenda.iter().copied().find(|idx| {
            !self.memory.fired.contains(idx)
                && self.rules.rules[*idx]
                    .when
                    .iter()
                    .all(|f| self.memory.facts.contains(f))
        })
    }

    /// Facts currently in working memory, asserted or derived.
    pub fn facts(&self) -> impl Iterator<Item = &str> {
        self.memory.facts.iter().map(String::as_str)
    }

    /// Disease conclusions in firing order.
    #[must_use]
    pub fn disease_facts(&self) -> &[DiseaseFact] {
        &self.memory.diseases
    }

    /// Names of the rules fired since the last reset, in priority order.
    pub fn fired_rules(&self) -> impl Iterator<Item = &str> {
        self.agenda
            .iter()
            .filter(|idx| self.memory.fired.contains(*idx))
            .map(|&idx| self.rules.rules[idx].name.as_str())
    }
}
