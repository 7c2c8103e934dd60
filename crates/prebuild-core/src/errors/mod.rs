//! Error handling for the pre-build resolver.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.
//!
//! Skips and stale file facts are not errors and have no variant here.

pub mod config_error;
pub mod error_code;
pub mod prebuild_error;
pub mod settings_error;
pub mod stage_error;

pub use config_error::ConfigError;
pub use error_code::PrebuildErrorCode;
pub use prebuild_error::PrebuildError;
pub use settings_error::SettingsError;
pub use stage_error::StageError;
