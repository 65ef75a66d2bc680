//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the NaviChat application.

use tracing::{debug, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::{NaviChatError, Result};

/// Initialize logging based on configuration
///
/// Keep the returned guard alive for as long as the file log should be flushed.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match &config.file_path {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "navichat.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let json_layer = config
        .json
        .then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stdout));
    let text_layer = (!config.json)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stdout));

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(json_layer)
        .with(text_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| NaviChatError::Config(format!("Failed to initialize logging: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log flow lifecycle events (bound, finished, reset) with structured data
pub fn log_flow_event(keyword: &str, event: &str, details: Option<&str>) {
    info!(
        keyword = keyword,
        event = event,
        details = details,
        "Flow event occurred"
    );
}

/// Log the outcome of a single conversation turn
pub fn log_turn_outcome(keyword: &str, step: &str, outcome: &str, next: &str) {
    info!(
        keyword = keyword,
        step = step,
        outcome = outcome,
        next = next,
        "Turn completed"
    );
}

/// Log the hand-off text produced at the end of a flow
pub fn log_handoff(keyword: &str, text: &str) {
    debug!(
        keyword = keyword,
        chars = text.chars().count(),
        "Hand-off text finalized"
    );
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}
