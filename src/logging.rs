use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::EnvFilter;

/// Keeps the non-blocking log writer alive for the lifetime of the process.
pub struct LoggingGuard {
    _worker: Option<WorkerGuard>,
}

pub fn init_logging(to_stdout: bool, file_path: &Path, level: LevelFilter) -> Result<LoggingGuard> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    if to_stdout {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
        return Ok(LoggingGuard { _worker: None });
    }

    if let Some(parent) = file_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {parent:?}"))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file_path)
        .with_context(|| format!("Failed to open log file {file_path:?}"))?;

    let (writer, guard) = non_blocking::NonBlockingBuilder::default().finish(file);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_target(true)
        .with_ansi(false)
        .init();

    Ok(LoggingGuard {
        _worker: Some(guard),
    })
}
