//! Tracing setup for vox.
//!
//! The engine logs every command and phase change at debug. Output goes to
//! stderr so it stays out of the countdown line on stdout.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log config/catalog loading and cues (info), unless RUST_LOG says otherwise
pub fn init() {
    init_with_level("info")
}

/// Install the subscriber with `default_level` as the filter when RUST_LOG
/// is unset. `vox` passes "warn" so a run only shows the countdown; set
/// `RUST_LOG=voice_core=debug` to trace every tick decision.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Debug-level engine traces, captured per test
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
