//! PrebuildErrorCode trait for structured error reporting.

/// Every error enum implements this to expose a stable, machine-readable
/// code alongside its display message.
pub trait PrebuildErrorCode {
    /// Returns the error code string (e.g., "MISSING_SETTING").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const MISSING_SETTING: &str = "MISSING_SETTING";
pub const INVALID_SETTING: &str = "INVALID_SETTING";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const STAGE_ORDER: &str = "STAGE_ORDER";
pub const COMPILATION_FAILED: &str = "COMPILATION_FAILED";
