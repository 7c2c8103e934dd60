//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::PropertyResolver;
use crate::constants::VERBOSE_SETTING;

static INIT: Once = Once::new();

const LOG_ENV_VAR: &str = "PREBUILD_LOG";

/// Initialize logging at the default level.
///
/// Reads `PREBUILD_LOG` for per-module levels, e.g.
/// `PREBUILD_LOG=prebuild_analysis=debug,prebuild_core=warn`.
/// Falls back to `prebuild=info` if unset or invalid. Idempotent.
pub fn init_tracing() {
    init_with_fallback("prebuild=info");
}

/// Initialize logging, falling back to `debug` when `verbose` is set.
/// `PREBUILD_LOG` still takes priority when present and valid.
pub fn init_tracing_verbose(verbose: bool) {
    if verbose {
        init_with_fallback("debug");
    } else {
        init_tracing();
    }
}

/// True when `sonar.verbose` resolves to `true` (case-insensitive).
pub fn is_verbose(resolver: &PropertyResolver) -> bool {
    resolver
        .resolve(VERBOSE_SETTING)
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

fn init_with_fallback(fallback: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(fallback));

        // A host process may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_line_number(true))
            .with(filter)
            .try_init();
    });
}
