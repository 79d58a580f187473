//! Tracing/logging setup shared by binaries and tests.
//!
//! Library crates only emit `tracing` events; installing a subscriber is the
//! job of the process entry point (or a test harness) through [`init`].

pub mod config;
pub mod subscriber;

pub use config::{LogFormat, ObservabilityConfig};

/// Initialize process-wide tracing from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    subscriber::init(&ObservabilityConfig::from_env());
}

/// Initialize process-wide tracing with an explicit configuration.
pub fn init_with(config: &ObservabilityConfig) {
    subscriber::init(config);
}
