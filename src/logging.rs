//! Logging configuration for sqlrag.
//!
//! Logs go to stderr so they never interleave with the chat output on
//! stdout. The filter is controlled via RUST_LOG.

use tracing_subscriber::EnvFilter;

/// Initializes logging to stderr.
pub fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
