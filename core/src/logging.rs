//! Logging setup shared by the gdm binaries.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize logging at `warn`, overridable with `RUST_LOG`.
pub fn init() {
    init_with_level("warn");
}

/// Initialize logging with a specific default level.
///
/// `RUST_LOG` still takes precedence. Output goes to stderr so that JSON
/// written to stdout stays machine-readable.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // try_init: a second call (tests, embedding) is a no-op instead of a panic
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
