//! The conditional override engine and its pure helpers.

pub mod engine;
pub mod filename;
pub mod types;

pub use engine::OverrideEngine;
pub use types::{OverrideOutcome, ResolvedAnalysisSettings};
