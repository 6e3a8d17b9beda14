//! Logging configuration
//!
//! Diagnostics go to standard error through `tracing`. The default filter only
//! lets warnings through so normal use prints nothing beyond the shell's own
//! output; set `RUST_LOG` (e.g. `RUST_LOG=sqlite_repl=debug`) for more.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "warn";

/// Initializes logging to standard error.
pub fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();
}
