use std::fs;
use std::path::Path;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use crate::config::Config;

const LOG_FILE_PREFIX: &str = "portview.log";

/// Keeps the background log writer alive; drop it last in `main`.
pub struct LoggingGuard {
    _worker: WorkerGuard,
}

/// RUST_LOG wins over the configured level; an unparseable directive falls back to `info`.
fn create_env_filter(config: &Config) -> EnvFilter {
    let directive = std::env::var("RUST_LOG")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| config.log_level.clone());

    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// The terminal belongs to the UI, so logs always go to a daily-rotated
/// file under `log_dir`.
pub fn init_logging(config: &Config) -> Result<LoggingGuard> {
    let dir = Path::new(&config.log_dir);
    fs::create_dir_all(dir)?;

    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, worker) = tracing_appender::non_blocking(appender);

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_writer(writer);

    tracing_subscriber::registry()
        .with(create_env_filter(config))
        .with(fmt_layer)
        .try_init()
        .ok();

    Ok(LoggingGuard { _worker: worker })
}
