//! Engine configuration sourced from the environment.
//!
//! Supported variables:
//! - `PHYTOTRUST_MODEL_PATH`: directory holding `classifier.json`, `rules.json`
//!   and the optional `symptoms.csv`, `reference.json`, `manifest.json`
//! - `PHYTOTRUST_PARALLEL_EVIDENCE`: evaluate both evidence sources on
//!   separate threads (default `true`)
//! - `PHYTOTRUST_RULE_CYCLE_LIMIT`: maximum rule firings per diagnosis
//! - `PHYTOTRUST_REQUIRE_MANIFEST`: refuse to start without `manifest.json`

use std::path::PathBuf;

pub const MODEL_PATH_ENV: &str = "PHYTOTRUST_MODEL_PATH";
pub const PARALLEL_EVIDENCE_ENV: &str = "PHYTOTRUST_PARALLEL_EVIDENCE";
pub const RULE_CYCLE_LIMIT_ENV: &str = "PHYTOTRUST_RULE_CYCLE_LIMIT";
pub const REQUIRE_MANIFEST_ENV: &str = "PHYTOTRUST_REQUIRE_MANIFEST";

/// Default number of rule firings allowed in a single inference run.
pub const DEFAULT_RULE_CYCLE_LIMIT: usize = 10_000;

/// Configuration for the diagnosis engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Directory containing the classifier, rule base and vocabulary.
    pub model_dir: PathBuf,

    /// Run the statistical and symbolic sources concurrently.
    pub parallel_evidence: bool,

    /// Upper bound on rule firings per inference run.
    pub rule_cycle_limit: usize,

    /// Fail startup when the model directory carries no manifest.
    pub require_manifest: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            parallel_evidence: true,
            rule_cycle_limit: DEFAULT_RULE_CYCLE_LIMIT,
            require_manifest: false,
        }
    }
}

impl EngineConfig {
    /// Load config overrides from environment (best-effort).
    ///
    /// Unparseable values are ignored with a warning and the default is kept.
    #[must_use]
    pub fn from_env_or_default() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var(MODEL_PATH_ENV) {
            let v = v.trim();
            if !v.is_empty() {
                cfg.model_dir = PathBuf::from(v);
            }
        }

        if let Some(b) = parse_bool_env(PARALLEL_EVIDENCE_ENV) {
            cfg.parallel_evidence = b;
        }

        if let Ok(v) = std::env::var(RULE_CYCLE_LIMIT_ENV) {
            match v.trim().parse::<usize>() {
                Ok(n) if n > 0 => cfg.rule_cycle_limit = n,
                _ => tracing::warn!(
                    "Ignoring {RULE_CYCLE_LIMIT_ENV}={v:?}; expected a positive integer"
                ),
            }
        }

        if let Some(b) = parse_bool_env(REQUIRE_MANIFEST_ENV) {
            cfg.require_manifest = b;
        }

        cfg
    }

    /// Use a different model directory.
    #[must_use]
    pub fn with_model_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.model_dir = dir.into();
        self
    }
}

/// Parse a boolean environment variable; `None` when unset or unrecognised.
pub(crate) fn parse_bool_env(name: &str) -> Option<bool> {
    let v = std::env::var(name).ok()?;
    parse_bool(&v)
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        other => {
            tracing::warn!("Unrecognised boolean value {other:?}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.model_dir, PathBuf::from("models"));
        assert!(cfg.parallel_evidence);
        assert!(!cfg.require_manifest);
        assert_eq!(cfg.rule_cycle_limit, DEFAULT_RULE_CYCLE_LIMIT);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("yes"), Some(true));
        assert_eq!(parse_bool(" 0 "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_with_model_dir() {
        let cfg = EngineConfig::default().with_model_dir("/tmp/bundle");
        assert_eq!(cfg.model_dir, PathBuf::from("/tmp/bundle"));
    }
}
