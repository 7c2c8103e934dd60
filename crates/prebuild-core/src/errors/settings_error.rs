//! Settings lookup errors.

use super::error_code::{self, PrebuildErrorCode};

/// Errors raised by required setting lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("Required setting is missing: {key}")]
    MissingSetting { key: String },

    #[error("Invalid value for setting {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl PrebuildErrorCode for SettingsError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingSetting { .. } => error_code::MISSING_SETTING,
            Self::InvalidValue { .. } => error_code::INVALID_SETTING,
        }
    }
}
