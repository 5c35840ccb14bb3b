//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Output goes to stderr so rendered documents on stdout stay clean. The level
//! is `info`, or `debug` when [`DEBUG_ENV`] is set; `RUST_LOG` takes precedence.

use std::io::IsTerminal;

use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable enabling debug output, shared with the host framework.
pub const DEBUG_ENV: &str = "SLS_DEBUG";

/// Base level derived from the environment.
pub fn default_level() -> tracing::Level {
    if std::env::var_os(DEBUG_ENV).is_some() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    }
}

fn build_filter(level: tracing::Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()))
}

/// Install the global subscriber; a second call is a no-op error.
pub fn try_init() -> Result<(), TryInitError> {
    let layer = fmt::layer()
        .compact()
        .without_time()
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry().with(layer).with(build_filter(default_level())).try_init()
}

/// Install the global subscriber, ignoring repeated initialization.
pub fn init() {
    let _ = try_init();
}
