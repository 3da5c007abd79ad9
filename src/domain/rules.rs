//! Expert rule base for the symbolic evidence source.
//!
//! Rules are authored as JSON and loaded once at startup:
//!
//! ```json
//! {
//!   "version": 1,
//!   "rules": [
//!     {"name": "tylcv-leaf-curl", "when": ["yellow-leaf-curling"],
//!      "then": {"disease": {"name": "tomato-yellow-leaf-curl-virus", "certainty": 0.9}}},
//!     {"name": "vascular-wilt-pattern", "salience": 50, "when": ["wilting", "vascular-browning"],
//!      "then": {"fact": "vascular-wilt-pattern"}}
//!   ]
//! }
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Rule base format version understood by this crate.
pub const RULE_BASE_VERSION: u32 = 1;

/// What a rule asserts when it fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Conclusion {
    /// Conclude a disease with a certainty factor in `[0, 1]`.
    Disease { name: String, certainty: f64 },
    /// Assert an intermediate fact that other rules may match.
    Fact(String),
}

/// A single production rule: all `when` facts present ⇒ `then`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,

    /// Higher salience fires first; ties keep declaration order.
    #[serde(default)]
    pub salience: i32,

    pub when: Vec<String>,

    pub then: Conclusion,
}

/// An immutable, validated set of rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleBase {
    pub version: u32,
    pub rules: Vec<Rule>,
}

impl RuleBase {
    /// Parse and validate a rule base from JSON text.
    ///
    /// # Errors
    /// Returns a description of the first problem found.
    pub fn from_json(text: &str) -> Result<Self, String> {
        let base: RuleBase =
            serde_json::from_str(text).map_err(|e| format!("Invalid rule base JSON: {e}"))?;
        base.validate()?;
        Ok(base)
    }

    /// Check structural invariants.
    ///
    /// # Errors
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.version != RULE_BASE_VERSION {
            return Err(format!("Unsupported rule base version: {}", self.version));
        }
        if self.rules.is_empty() {
            return Err("Rule base contains no rules".into());
        }

        let mut names = BTreeSet::new();
        for rule in &self.rules {
            if rule.name.trim().is_empty() {
                return Err("Rule with empty name".into());
            }
            if !names.insert(rule.name.as_str()) {
                return Err(format!("Duplicate rule name: {}", rule.name));
            }
            if rule.when.is_empty() {
                return Err(format!("Rule {} has no conditions", rule.name));
            }
            for fact in &rule.when {
                validate_fact(fact).map_err(|e| format!("Rule {}: {e}", rule.name))?;
            }
            match &rule.then {
                Conclusion::Disease { name, certainty } => {
                    validate_fact(name).map_err(|e| format!("Rule {}: {e}", rule.name))?;
                    if !certainty.is_finite() || !(0.0..=1.0).contains(certainty) {
                        return Err(format!(
                            "Rule {}: certainty {certainty} outside [0, 1]",
                            rule.name
                        ));
                    }
                }
                Conclusion::Fact(fact) => {
                    validate_fact(fact).map_err(|e| format!("Rule {}: {e}", rule.name))?;
                }
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Diseases that at least one rule can conclude.
    #[must_use]
    pub fn diseases(&self) -> BTreeSet<&str> {
        self.rules
            .iter()
            .filter_map(|r| match &r.then {
                Conclusion::Disease { name, .. } => Some(name.as_str()),
                Conclusion::Fact(_) => None,
            })
            .collect()
    }
}

/// A fact token must be non-empty and free of whitespace and delimiters.
///
/// # Errors
/// Returns a description of why the token is malformed.
pub fn validate_fact(token: &str) -> Result<(), String> {
    if token.is_empty() {
        return Err("empty fact".into());
    }
    if let Some(c) = token
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || matches!(c, '(' | ')' | '"' | ';'))
    {
        return Err(format!("fact {token:?} contains forbidden character {c:?}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "version": 1,
        "rules": [
            {"name": "r1", "when": ["a"], "then": {"disease": {"name": "d", "certainty": 0.5}}},
            {"name": "r2", "salience": 5, "when": ["a", "b"], "then": {"fact": "c"}}
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let base = RuleBase::from_json(SAMPLE).expect("valid rule base");
        assert_eq!(base.len(), 2);
        assert_eq!(base.rules[0].salience, 0);
        assert_eq!(base.rules[1].then, Conclusion::Fact("c".into()));
        assert_eq!(base.diseases().into_iter().collect::<Vec<_>>(), vec!["d"]);
    }

    #[test]
    fn test_rejects_out_of_range_certainty() {
        let text = SAMPLE.replace("0.5", "1.5");
        let err = RuleBase::from_json(&text).expect_err("must reject");
        assert!(err.contains("outside [0, 1]"));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let text = SAMPLE.replace("\"r2\"", "\"r1\"");
        let err = RuleBase::from_json(&text).expect_err("must reject");
        assert!(err.contains("Duplicate"));
    }

    #[test]
    fn test_rejects_unknown_version() {
        let text = SAMPLE.replace("\"version\": 1", "\"version\": 2");
        assert!(RuleBase::from_json(&text).is_err());
    }

    #[test]
    fn test_validate_fact() {
        assert!(validate_fact("yellow-leaf-curling").is_ok());
        assert!(validate_fact("").is_err());
        assert!(validate_fact("two words").is_err());
        assert!(validate_fact("(symptom)").is_err());
    }
}
