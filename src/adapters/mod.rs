//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual evidence machinery and resource loading:
//! - `forest`: random-forest classifier evaluated from its JSON export
//! - `statistical`: classifier-backed evidence source
//! - `rules`: forward-chaining rule engine and its evidence source
//! - `reference`: static treatment/prevention table
//! - `bundle`: model directory loading with manifest verification

pub mod bundle;
pub mod forest;
pub mod reference;
pub mod rules;
pub mod statistical;

pub use bundle::ResourceBundle;
pub use forest::RandomForestModel;
pub use reference::StaticReferenceTable;
pub use rules::RuleEvidence;
pub use statistical::StatisticalEvidence;
