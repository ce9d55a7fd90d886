//! Tracing setup for the application.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Builds the default filter for this crate from a level name.
pub fn default_filter(level: Option<&str>) -> String {
    format!("attendance_app={}", level.unwrap_or(DEFAULT_LOG_LEVEL))
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over `level`.
/// Calling this more than once is harmless.
pub fn init_logging(level: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_thread_ids(false));

    let _ = subscriber.try_init();
}
