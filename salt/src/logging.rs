//! Diagnostic tracing for hosts embedding the substrate.
//!
//! Library code only emits `tracing` events; installing a subscriber is the
//! host's choice. The `salt` binary calls [`init`] on start-up.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`, defaulting to `warn`. Output goes to stderr in compact
/// format so stdout stays reserved for command results.
///
/// # Example
/// ```bash
/// RUST_LOG=salt=debug salt turn scene.txt --bind "hero class"
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
