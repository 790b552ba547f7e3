//! Diagnostic logging via `tracing`.
//!
//! Events go to stderr so stdout stays clean for `get`, which prints a
//! password there.  Key material, passwords and plaintext are never
//! passed to any log macro.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV: &str = "PASSVAULT_LOG";

/// Install the global subscriber.
///
/// `PASSVAULT_LOG` wins over `default_filter` (from `Settings::log_level`).
/// Calling this twice is harmless; the second call is ignored.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .with(filter)
        .try_init();
}
