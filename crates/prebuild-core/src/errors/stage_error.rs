//! Stage sequencing errors.

use super::error_code::{self, PrebuildErrorCode};

/// Errors raised when the build stages are driven incorrectly or the
/// external compiler fails. Guard skips are not errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StageError {
    #[error("Stage {actual} requested while the sequencer expects {expected}")]
    OutOfOrder { expected: String, actual: String },

    #[error("Stage sequence already finished; {actual} cannot run")]
    Finished { actual: String },

    #[error("Compilation failed: {0}")]
    Compilation(String),
}

impl PrebuildErrorCode for StageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfOrder { .. } | Self::Finished { .. } => error_code::STAGE_ORDER,
            Self::Compilation(_) => error_code::COMPILATION_FAILED,
        }
    }
}
