//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the fusion logic and the reasoning back-ends (trained classifier,
//! rule engine, reference tables).

mod classifier;
mod evidence;
mod reference;

pub use classifier::{Classifier, ClassifierError};
pub use evidence::{EvidenceError, EvidenceSource, RuleError};
pub use reference::ReferenceData;
