use std::{
    fs,
    path::Path,
    time::{Duration, SystemTime},
};

use anyhow::Context;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, filter::Directive, fmt, prelude::*};

const MAX_LOG_AGE: Duration = Duration::from_secs(60 * 60 * 24 * 3);

/// Keeps the file writer flushing until the process exits
#[allow(dead_code)]
pub struct LoggerGuard(Option<WorkerGuard>);

/// Console logs go to stderr so stdout only carries results.
pub fn init_logging(log_dir: Option<&Path>, prefix: &str, level: &str) -> anyhow::Result<LoggerGuard> {
    let (level, invalid_level) = match level {
        "trace" | "debug" | "info" | "warn" | "error" => (level, false),
        _ => ("info", true),
    };

    let directive: Directive = level.parse().context("Failed to parse log level")?;
    let builder = EnvFilter::builder().with_default_directive(directive);
    let rust_log = std::env::var("RUST_LOG").unwrap_or_default();

    let console_filter = builder.clone().parse_lossy(&rust_log);
    let file_filter = builder.parse_lossy(&rust_log);

    let (file_layer, guard) = match log_dir {
        Some(log_dir) => {
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(prefix)
                .filename_suffix("log")
                .build(log_dir)
                .context("Failed to create file appender")?;
            let (non_blocking, guard) = NonBlocking::new(file_appender);
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(file_filter);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_filter(console_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if invalid_level {
        tracing::warn!("Invalid log level, defaulting to 'info'");
    }

    if let Some(log_dir) = log_dir {
        if let Err(e) = cleanup_old_logs(log_dir, prefix, MAX_LOG_AGE) {
            tracing::warn!("Failed to delete old log file: {}", e);
        }
    }

    Ok(LoggerGuard(guard))
}

fn cleanup_old_logs(log_dir: &Path, prefix: &str, max_age: Duration) -> std::io::Result<usize> {
    let cutoff = SystemTime::now() - max_age;
    let mut removed = 0;

    for entry in fs::read_dir(log_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !(name.starts_with(prefix) && name.ends_with(".log")) {
            continue;
        }

        let stale = entry.metadata()?.modified().is_ok_and(|modified| modified < cutoff);
        if stale {
            fs::remove_file(entry.path())?;
            removed += 1;
            tracing::info!("Removed stale log file {}", name);
        }
    }
    Ok(removed)
}
