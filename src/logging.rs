//! Tracing subscriber setup.
//!
//! The library itself only emits `tracing` events; installing a
//! subscriber is left to the embedding application.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs a global fmt subscriber.
///
/// # Environment
/// - `RUST_LOG`: filter directives (default `info`),
///   e.g. `RUST_LOG=u_timetable=debug`
///
/// Panics if a global subscriber is already set; use [`try_init`] when
/// that may happen.
///
/// ```no_run
/// u_timetable::logging::init();
/// ```
pub fn init() {
    fmt()
        .with_env_filter(default_filter())
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// Like [`init`], but returns `false` instead of panicking when a
/// subscriber is already installed.
pub fn try_init() -> bool {
    fmt()
        .with_env_filter(default_filter())
        .with_target(true)
        .with_line_number(true)
        .try_init()
        .is_ok()
}

/// Debug-level subscriber writing through the test harness.
///
/// Safe to call from every test.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
