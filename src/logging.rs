//! Process-wide tracing subscriber: stdout plus an append-only log file.

use crate::config::{Settings, DEFAULT_LOG_FILTER};
use crate::error::ConfigError;
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. Call once, before the listener starts.
pub fn init(settings: &Settings) -> Result<(), ConfigError> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.log_file)
        .map_err(|source| ConfigError::LogFile {
            path: settings.log_file.display().to_string(),
            source,
        })?;

    let filter = EnvFilter::try_new(&settings.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_writer(Arc::new(log_file)),
        )
        .init();
    Ok(())
}
