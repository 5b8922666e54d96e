//! Test helpers shared across the deepmerge workspace.
//!
//! Provides value builders, a thread-safe call recorder for observing custom
//! merge functions, `figment::Jail` plumbing for settings tests and text
//! normalisation for behavioural steps.

pub mod figment;
pub mod recorder;
pub mod text;
pub mod values;
