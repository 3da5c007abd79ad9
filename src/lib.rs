//! # Phytotrust
//!
//! Hybrid tomato-disease diagnosis from observed symptoms.
//!
//! This crate provides:
//! - A random-forest classifier adapter (statistical evidence)
//! - A forward-chaining rule engine adapter (symbolic evidence)
//! - A fusion engine that blends both into a ranked, tiered result list
//! - Terminal and command-line front-ends
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (symptoms, confidence maps, diagnoses, rules)
//! - `ports`: Trait definitions for evidence sources, classifiers and reference data
//! - `adapters`: Concrete implementations (random forest, rule engine, resource bundle)
//! - `application`: Fusion engine and the diagnosis service
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use application::{DiagnosisService, FusionEngine};
pub use config::EngineConfig;
pub use domain::{ConfidenceMap, ConfidenceTier, DiagnosisResult, ResultList, SymptomSet};

/// Result type for Phytotrust operations
pub type Result<T> = std::result::Result<T, PhytotrustError>;

/// Main error type for Phytotrust.
///
/// Only startup can fail: once a [`DiagnosisService`] exists, diagnoses
/// always produce a well-formed [`ResultList`].
#[derive(Debug, thiserror::Error)]
pub enum PhytotrustError {
    #[error("Resource unavailable ({resource}): {reason}")]
    ResourceUnavailable { resource: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PhytotrustError {
    /// Shorthand for a startup resource failure.
    pub fn unavailable(resource: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::ResourceUnavailable {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }
}
