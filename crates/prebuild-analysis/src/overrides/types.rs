//! Engine output.

use serde::Serialize;

/// Final analysis settings for one project. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ResolvedAnalysisSettings {
    pub error_log_path: Option<String>,
    pub resolved_rule_set_path: Option<String>,
    /// Deduplicated, in order.
    pub analyzer_items: Vec<String>,
    pub additional_file_items: Vec<String>,
    /// Analyzer findings must not fail the build: turn off
    /// warnings-as-errors when analysis is active.
    pub suppress_warnings_as_errors: bool,
}

impl ResolvedAnalysisSettings {
    /// All fields empty: analysis disabled.
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn is_cleared(&self) -> bool {
        *self == Self::cleared()
    }
}

/// Result of one engine invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverrideOutcome {
    /// Working path not set: the caller must leave the project untouched.
    NotActivated,
    Resolved(ResolvedAnalysisSettings),
}

impl OverrideOutcome {
    pub fn settings(&self) -> Option<&ResolvedAnalysisSettings> {
        match self {
            Self::NotActivated => None,
            Self::Resolved(settings) => Some(settings),
        }
    }

    pub fn is_activated(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}
