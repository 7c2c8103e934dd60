//! StageEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Observer of the stage sequence. Handlers override only the events they
/// care about. `Send + Sync` so one handler can watch concurrent projects.
pub trait StageEventHandler: Send + Sync {
    fn on_stage_started(&self, _event: &StageStartedEvent) {}
    fn on_stage_completed(&self, _event: &StageCompletedEvent) {}
    fn on_stage_skipped(&self, _event: &StageSkippedEvent) {}
    fn on_stale_fact(&self, _event: &StaleFactEvent) {}
    fn on_results_published(&self, _event: &ResultsPublishedEvent) {}
}
