//! Reference data port: static care guidance per disease.

use crate::domain::CareAdvice;

/// Trait for reference data lookups.
///
/// Lookups never fail: an unknown disease yields [`CareAdvice::placeholder`].
pub trait ReferenceData: Send + Sync {
    fn lookup(&self, disease: &str) -> CareAdvice;
}
