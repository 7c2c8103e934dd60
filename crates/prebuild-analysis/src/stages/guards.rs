//! Guard predicates deciding whether a stage runs or is skipped.
//! Pure apart from the file probe, so they test without a compiler.

use std::fmt;
use std::path::{Path, PathBuf};

use prebuild_core::config::{AnalysisConfig, PropertyResolver};

use crate::facts::FileProbe;

/// Why a stage was skipped. Skips are normal outcomes, not failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    WorkingPathNotSet,
    UnknownLanguage,
    NoErrorLog,
    ResultsFileMissing(PathBuf),
    NothingCollected,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WorkingPathNotSet => f.write_str("working path setting is empty"),
            Self::UnknownLanguage => f.write_str("project language is not supported"),
            Self::NoErrorLog => f.write_str("no diagnostic log path is set"),
            Self::ResultsFileMissing(path) => {
                write!(f, "diagnostic log not found: {}", path.display())
            }
            Self::NothingCollected => f.write_str("no results were collected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    Proceed,
    Skip(SkipReason),
}

/// The working path setting, trimmed, when non-empty.
pub fn working_path<'a>(resolver: &'a PropertyResolver, config: &AnalysisConfig) -> Option<&'a str> {
    resolver
        .resolve(config.effective_temp_path_key())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// The analysis override runs only when the working path is set.
pub fn override_guard(resolver: &PropertyResolver, config: &AnalysisConfig) -> Guard {
    match working_path(resolver, config) {
        Some(_) => Guard::Proceed,
        None => Guard::Skip(SkipReason::WorkingPathNotSet),
    }
}

/// Results collection needs the working path, a known language, an error
/// log path, and the log file on disk. `error_log` should already be
/// resolved against the project directory.
pub fn results_guard(
    resolver: &PropertyResolver,
    config: &AnalysisConfig,
    language_known: bool,
    error_log: Option<&Path>,
    probe: &dyn FileProbe,
) -> Guard {
    if working_path(resolver, config).is_none() {
        return Guard::Skip(SkipReason::WorkingPathNotSet);
    }
    if !language_known {
        return Guard::Skip(SkipReason::UnknownLanguage);
    }
    match error_log {
        None => Guard::Skip(SkipReason::NoErrorLog),
        Some(path) if !probe.exists(path) => {
            Guard::Skip(SkipReason::ResultsFileMissing(path.to_path_buf()))
        }
        Some(_) => Guard::Proceed,
    }
}
