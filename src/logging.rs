//! tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber.
///
/// Level comes from `RUST_LOG` (for example `RUST_LOG=feeder_analysis=debug`),
/// defaulting to `info`. Output goes to stderr so the printed report on
/// stdout stays clean.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Debug-level subscriber for tests; safe to call more than once.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
