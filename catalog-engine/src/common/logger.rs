//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production
//! environments:
//! - Console output (plain for development, JSON for production)
//! - Optional daily rotating file logs

use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, prelude::*, EnvFilter, Layer};

/// Initialize the logging system (console only)
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn")
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init_logger(level: &str) -> anyhow::Result<()> {
    init_logger_with_file(level, false, None)
}

/// Initialize the logging system with optional daily rotating file logs
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn")
/// * `json_format` - Whether to use JSON format (true for production)
/// * `log_dir` - Optional directory for file logging
///
/// # Examples
/// ```no_run
/// use catalog_engine::init_logger_with_file;
///
/// // Development setup (console only)
/// init_logger_with_file("debug", false, None).unwrap();
///
/// // Production setup (console + file)
/// init_logger_with_file("info", true, Some("./logs")).unwrap();
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    let file_layer = match log_dir {
        Some(dir) => {
            let log_dir = Path::new(dir);
            fs::create_dir_all(log_dir)?;

            // Daily rotating appender for application logs
            let app_log = RollingFileAppender::new(Rotation::DAILY, log_dir, "app");
            let layer = fmt::layer()
                .json()
                .with_target(true)
                .with_ansi(false)
                .with_writer(app_log)
                .with_filter(EnvFilter::new(level));
            Some(layer.boxed())
        }
        None => None,
    };

    if json_format {
        // JSON format for production
        let console_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_filter(EnvFilter::new(level));
        subscriber.with(console_layer.boxed()).with(file_layer).init();
    } else {
        // Human-readable format for development
        let console_layer = fmt::layer()
            .with_target(true)
            .with_filter(EnvFilter::new(level));
        subscriber.with(console_layer.boxed()).with(file_layer).init();
    }

    tracing::info!(level = %level, json = json_format, "Logger initialized");
    Ok(())
}
