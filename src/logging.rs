//! Tracing setup
//!
//! Logs go to stderr; stdout carries the MCP stdio transport and must stay clean.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::{LogFormat, WebexConfig};

/// Install the global subscriber; keep the guard alive until shutdown so
/// buffered lines are flushed
pub fn init(config: &WebexConfig) -> Result<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_filter()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    let (text_layer, json_layer) = match config.log_format {
        LogFormat::Text => (
            Some(fmt::layer().with_writer(writer).with_ansi(false)),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .json()
                    .with_current_span(true),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}
