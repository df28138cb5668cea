//! Console telemetry for the client binary.
//!
//! Installs a `tracing-subscriber` fmt layer. The filter defaults to `info`
//! and can be overridden through `RUST_LOG`.

use tracing_subscriber::EnvFilter;

pub fn init_telemetry() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
