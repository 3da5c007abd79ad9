//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides a keyboard-driven interface for:
//! - Ticking observed symptoms
//! - Ranked, tier-coloured diagnosis results with care guidance
//! - Switching between English and Spanish

mod app;
mod i18n;
mod styles;
mod ui;

pub use app::App;
pub use i18n::{Labels, Language};
pub use styles::PlantTheme;
