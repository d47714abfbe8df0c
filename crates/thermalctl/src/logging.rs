//! Diagnostic logging for thermalctl
//!
//! Logs go to stderr so stdout carries only the alert stream. RUST_LOG wins
//! over the configured level.

use tracing_subscriber::{fmt, EnvFilter};

/// Filter from RUST_LOG, or `default_level` when unset or invalid
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global subscriber; a second call is a no-op
pub fn init(default_level: &str) {
    let _ = fmt()
        .with_env_filter(env_filter(default_level))
        .with_target(true)
        .with_level(true)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
