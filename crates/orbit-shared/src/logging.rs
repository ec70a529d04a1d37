//! Tracing bootstrap for binaries and harnesses embedding the store.

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber.
///
/// Honours `RUST_LOG`; defaults to info-level events from the Orbit crates
/// and warnings from everything else. Calling this twice is a no-op rather
/// than a panic so test harnesses can call it freely.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("orbit_store=info,orbit_agent=info,warn"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}
