//! Logging setup.
//!
//! Everything in this crate logs through `tracing`; this module installs the
//! subscriber. Output goes to stderr so it never mixes with anything the host
//! writes to stdout.

use crate::config::Config;
use tracing_subscriber::EnvFilter;

/// Build the log filter: `RUST_LOG` if set, otherwise the configured level.
pub fn log_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
}

/// Install the global `tracing` subscriber.
///
/// Safe to call more than once; only the first call installs anything.
/// Returns whether this call installed the subscriber.
pub fn init_logging(config: &Config) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(config))
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
