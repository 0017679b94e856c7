// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing setup for the daemon.

use std::io::Write;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::lifecycle::LifecycleError;

/// Startup marker prefix written to log before anything else.
/// Full format: "--- devagentd: starting (pid: 12345) ---"
pub const STARTUP_MARKER_PREFIX: &str = "--- devagentd: starting (pid: ";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to `log_path` through a non-blocking writer.
///
/// Keep the returned guard alive; dropping it flushes and stops the writer.
pub fn init_file_logging(log_path: &Path) -> Result<WorkerGuard, LifecycleError> {
    let dir = log_path.parent().ok_or(LifecycleError::NoStateDir)?;
    let file_name = log_path.file_name().ok_or(LifecycleError::NoStateDir)?;
    std::fs::create_dir_all(dir)?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(guard)
}

/// Log to stderr, for a daemon running in the foreground.
pub fn init_stderr_logging() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Append the startup marker line (before tracing is set up).
pub fn write_startup_marker(log_path: &Path) -> Result<(), LifecycleError> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;
    writeln!(file, "{}{}) ---", STARTUP_MARKER_PREFIX, std::process::id())?;
    Ok(())
}

/// Write a startup error synchronously so it survives a quick exit.
pub fn write_startup_error(log_path: &Path, error: &LifecycleError) {
    let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
    else {
        return;
    };
    let _ = writeln!(file, "ERROR Failed to start daemon: {}", error);
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
