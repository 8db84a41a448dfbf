use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use file_rotate::compression::Compression;
use file_rotate::suffix::AppendCount;
use file_rotate::{ContentLimit, FileRotate};
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Install console and rotating-file logging.
///
/// File output goes through a background writer; keep the returned guard
/// alive until exit so buffered lines are flushed when it drops.
pub fn init(config: &LoggingConfig) -> Result<WorkerGuard> {
    if let Some(parent) = config.file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {:?}", parent))?;
    }

    let file = rotating_file(config);
    let (file_writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

/// Size-capped log file keeping `backups` older files as `<file>.1`, `<file>.2`, ...
fn rotating_file(config: &LoggingConfig) -> FileRotate<AppendCount> {
    let suffix = AppendCount::new(config.backups);
    let limit = ContentLimit::Bytes(config.max_bytes);

    #[cfg(unix)]
    let file = FileRotate::new(&config.file, suffix, limit, Compression::None, None);
    #[cfg(not(unix))]
    let file = FileRotate::new(&config.file, suffix, limit, Compression::None);

    file
}
