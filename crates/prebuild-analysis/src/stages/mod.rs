//! Build stage sequencing around the external compiler.

pub mod compiler;
pub mod guards;
pub mod sequencer;
pub mod types;

pub use compiler::Compiler;
pub use guards::{Guard, SkipReason};
pub use prebuild_core::types::Stage;
pub use sequencer::StageSequencer;
pub use types::{SequenceReport, StageRecord, StageStatus};
