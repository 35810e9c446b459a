//! Logging setup
//!
//! Diagnostics are `tracing` events written to stderr so that stdout stays
//! reserved for command output.

use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable that overrides every other log filter source
pub const LOG_ENV: &str = "TDESK_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Pick the filter directive: env var, then --verbose, then config, then default
pub fn filter_directive(env: Option<String>, verbose: bool, configured: Option<&str>) -> String {
    if let Some(directive) = env.filter(|d| !d.trim().is_empty()) {
        return directive;
    }
    if verbose {
        return "tdesk=debug,warn".to_string();
    }
    configured.unwrap_or(DEFAULT_FILTER).to_string()
}

/// Initialize the global subscriber
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_logging(verbose: bool, configured: Option<&str>) {
    let directive = filter_directive(std::env::var(LOG_ENV).ok(), verbose, configured);
    let env_filter =
        EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let result = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(verbose)
                .with_level(true),
        )
        .try_init();

    if result.is_ok() {
        tracing::debug!(filter = %directive, "logging initialized");
    }
}
