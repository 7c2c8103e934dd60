//! Observability for the pre-build resolver.
//! `tracing` crate with `EnvFilter`, per-module log levels.

pub mod setup;

pub use setup::{init_tracing, init_tracing_verbose, is_verbose};
