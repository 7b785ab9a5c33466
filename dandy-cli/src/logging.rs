//! Ambient structured logging, gated behind the standard `tracing`/`RUST_LOG`
//! convention (§4.10): purely observational, never affects control flow or exit codes.

use tracing_subscriber::EnvFilter;

/// Installs a `tracing` subscriber that writes to stderr. Verbosity defaults to `info`
/// and is overridden by `RUST_LOG`, the same way any `tracing`-instrumented binary is
/// configured.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
