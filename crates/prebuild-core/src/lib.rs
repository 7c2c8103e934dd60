//! Core of the pre-build analysis resolver: property sources and their
//! precedence resolution, analysis configuration, errors, stage events,
//! and tracing setup. Shared by `prebuild-analysis`.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod types;
