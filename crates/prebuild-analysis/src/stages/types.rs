//! Stage outcomes and the per-project run report.

use std::path::PathBuf;

use crate::facts::{ProjectClassification, StaleFact};
use crate::overrides::ResolvedAnalysisSettings;
use prebuild_core::types::Stage;

/// How a stage ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageStatus {
    Completed,
    Skipped { reason: String },
}

impl StageStatus {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRecord {
    pub stage: Stage,
    pub status: StageStatus,
}

/// Everything one project's stage run produced. Stale facts are collected
/// here as non-fatal findings rather than raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceReport {
    pub project: PathBuf,
    pub records: Vec<StageRecord>,
    pub classification: Option<ProjectClassification>,
    pub resolved: Option<ResolvedAnalysisSettings>,
    pub stale_facts: Vec<StaleFact>,
    /// `(setting key, diagnostic log path)` when results were published.
    pub published: Option<(String, String)>,
}

impl SequenceReport {
    pub fn status_of(&self, stage: Stage) -> Option<&StageStatus> {
        self.records
            .iter()
            .find(|r| r.stage == stage)
            .map(|r| &r.status)
    }

    pub fn was_skipped(&self, stage: Stage) -> bool {
        self.status_of(stage).is_some_and(StageStatus::is_skipped)
    }

    /// Stages in the order they ran.
    pub fn executed_stages(&self) -> Vec<Stage> {
        self.records.iter().map(|r| r.stage).collect()
    }

    /// True when no stale facts were found.
    pub fn is_clean(&self) -> bool {
        self.stale_facts.is_empty()
    }
}
