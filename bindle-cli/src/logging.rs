//! Log subscriber setup.
//!
//! Built on `tracing-subscriber` with per-phase targets. Only the binary
//! installs a subscriber; the library crates just emit events.

use std::io;

use bindle_api::Phase;
use tracing::Level;
use tracing_subscriber::{
    filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Colorized multi-line output for development.
    Pretty,
    /// One event per line.
    Compact,
    /// JSON, for tool integration.
    Json,
}

/// Parse a log level name.
pub fn parse_level(value: &str) -> Result<Level, String> {
    match value.to_ascii_lowercase().as_str() {
        "error" => Ok(Level::ERROR),
        "warn" => Ok(Level::WARN),
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        "trace" => Ok(Level::TRACE),
        other => Err(format!(
            "unknown log level '{other}' (expected error, warn, info, debug or trace)"
        )),
    }
}

/// Install the global subscriber for this invocation.
pub fn init(level: Level, format: LogFormat) {
    let mut targets = Targets::new().with_default(level);
    for phase in Phase::all() {
        targets = targets.with_target(phase.target(), level);
    }

    let layer = match format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_writer(io::stderr)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(false)
            .without_time()
            .with_writer(io::stderr)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_writer(io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer.with_filter(targets))
        .init();
}
