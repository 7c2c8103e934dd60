//! Top-level error aggregating the subsystem errors.

use super::error_code::PrebuildErrorCode;
use super::{ConfigError, SettingsError, StageError};

/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PrebuildError {
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Stage error: {0}")]
    Stage(#[from] StageError),
}

impl PrebuildErrorCode for PrebuildError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Settings(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Stage(e) => e.error_code(),
        }
    }
}
