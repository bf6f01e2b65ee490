use std::fs::create_dir_all;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use util::config::AppConfig;

const FALLBACK_FILTER: &str = "marker=info";

/// Builds the event filter from a directive string such as `marker=debug`.
///
/// Unparseable or blank directives fall back to `marker=info`.
pub fn build_filter(log_level: &str) -> EnvFilter {
    if log_level.trim().is_empty() {
        return EnvFilter::new(FALLBACK_FILTER);
    }
    EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER))
}

/// Splits `logs/marker.log` into the rolling appender's directory and file prefix.
fn split_log_path(log_file_path: &str) -> (String, String) {
    let path = Path::new(log_file_path);
    let dir = path
        .parent()
        .map(|p| p.to_string_lossy().to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| ".".to_string());
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "marker.log".to_string());
    (dir, name)
}

/// Installs the global subscriber: a daily-rolling plain-text file layer and,
/// when requested, an ANSI stdout layer.
///
/// Keep the returned guard alive for the lifetime of the process, dropping it
/// flushes and stops the background writer.
pub fn init_logger(
    log_level: &str,
    log_file_path: &str,
    log_to_stdout: bool,
) -> Result<WorkerGuard, String> {
    let (dir, name) = split_log_path(log_file_path);
    create_dir_all(&dir).map_err(|e| format!("Failed to create log directory {dir}: {e}"))?;

    let file_appender = rolling::daily(&dir, &name);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let stdout_layer = log_to_stdout.then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_target(true)
    });

    tracing_subscriber::registry()
        .with(build_filter(log_level))
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .map_err(|e| format!("Failed to initialize logger: {e}"))?;

    Ok(guard)
}

/// [`init_logger`] driven by the global [`AppConfig`].
pub fn init_from_config() -> Result<WorkerGuard, String> {
    let (level, file, to_stdout) = {
        let cfg = AppConfig::global();
        (cfg.log_level.clone(), cfg.log_file.clone(), cfg.log_to_stdout)
    };
    init_logger(&level, &file, to_stdout)
}
