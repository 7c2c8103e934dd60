//! EventDispatcher: synchronous fan-out to registered handlers.

use std::sync::Arc;

use tracing::warn;

use super::handler::StageEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
///
/// With no handlers registered, `emit` iterates over an empty Vec.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn StageEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: Arc<dyn StageEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Handlers that panic are caught and do not prevent subsequent
    /// handlers from receiving the event.
    fn emit<F: Fn(&dyn StageEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                warn!("stage event handler panicked; continuing");
            }
        }
    }

    pub fn emit_stage_started(&self, event: &StageStartedEvent) {
        self.emit(|h| h.on_stage_started(event));
    }

    pub fn emit_stage_completed(&self, event: &StageCompletedEvent) {
        self.emit(|h| h.on_stage_completed(event));
    }

    pub fn emit_stage_skipped(&self, event: &StageSkippedEvent) {
        self.emit(|h| h.on_stage_skipped(event));
    }

    pub fn emit_stale_fact(&self, event: &StaleFactEvent) {
        self.emit(|h| h.on_stale_fact(event));
    }

    pub fn emit_results_published(&self, event: &ResultsPublishedEvent) {
        self.emit(|h| h.on_results_published(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
