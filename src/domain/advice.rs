//! Treatment and prevention guidance attached to a diagnosis.

use serde::{Deserialize, Serialize};

/// Placeholder shown when no guidance is known for a disease.
pub const PLACEHOLDER_TEXT: &str = "-";

/// Static care guidance for one disease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareAdvice {
    pub treatment: String,
    pub prevention: String,
}

impl CareAdvice {
    #[must_use]
    pub fn new(treatment: impl Into<String>, prevention: impl Into<String>) -> Self {
        Self {
            treatment: treatment.into(),
            prevention: prevention.into(),
        }
    }

    /// The `("-", "-")` pair used for unknown diseases.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_TEXT, PLACEHOLDER_TEXT)
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.treatment == PLACEHOLDER_TEXT && self.prevention == PLACEHOLDER_TEXT
    }
}

impl Default for CareAdvice {
    fn default() -> Self {
        Self::placeholder()
    }
}
