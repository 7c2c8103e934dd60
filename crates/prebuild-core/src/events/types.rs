//! Event payload types.

use std::path::PathBuf;

use crate::types::Stage;

/// Payload for `on_stage_started`.
#[derive(Debug, Clone)]
pub struct StageStartedEvent {
    pub project: PathBuf,
    pub stage: Stage,
}

/// Payload for `on_stage_completed`.
#[derive(Debug, Clone)]
pub struct StageCompletedEvent {
    pub project: PathBuf,
    pub stage: Stage,
}

/// Payload for `on_stage_skipped`. A skip is an intentional no-op.
#[derive(Debug, Clone)]
pub struct StageSkippedEvent {
    pub project: PathBuf,
    pub stage: Stage,
    pub reason: String,
}

/// Payload for `on_stale_fact`: a file seen earlier has since vanished.
#[derive(Debug, Clone)]
pub struct StaleFactEvent {
    pub project: PathBuf,
    pub path: PathBuf,
    pub kind: String,
}

/// Payload for `on_results_published`.
#[derive(Debug, Clone)]
pub struct ResultsPublishedEvent {
    pub project: PathBuf,
    pub setting_key: String,
    pub report_path: PathBuf,
}
