//! Tracing subscriber setup.

use std::sync::LazyLock;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Error returned when a global subscriber is already installed.
pub type LoggingError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Builds the filter: `RUST_LOG` if set, otherwise `default_level` for this crate.
fn env_filter(default_level: LevelFilter) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}={default_level}",
            env!("CARGO_PKG_NAME").replace('-', "_"),
        ))
    })
}

/// Installs the global fmt subscriber for the server binary.
///
/// # Errors
///
/// Fails if a global subscriber has already been installed.
pub fn enable_logging(default_level: LevelFilter) -> Result<(), LoggingError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_target(false)
        .try_init()
}

/// Subscriber for tests, writing through the test harness capture.
///
/// Force it once per test binary; repeated forcing is a no-op.
pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .try_init();
});
