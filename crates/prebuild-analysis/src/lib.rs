//! Per-project analysis resolution: classify a build unit, decide which
//! analyzers, rule set, error log and additional files it receives, and
//! drive those decisions through the build stages around compilation.

pub mod batch;
pub mod facts;
pub mod overrides;
pub mod stages;
pub mod unit;

pub use batch::{resolve_projects, BatchOutcome, BatchSummary};
pub use facts::{FileProbe, FsProbe, ProjectClassification, ProjectFacts, ProjectInspector};
pub use overrides::{OverrideEngine, OverrideOutcome, ResolvedAnalysisSettings};
pub use stages::{Compiler, SequenceReport, StageSequencer, StageStatus};
pub use unit::{BuildItem, BuildUnit};
