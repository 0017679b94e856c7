// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! devagent daemon library
//!
//! Shared by the `devagentd` binary and `devagent daemon`, which runs the
//! same loop in the foreground.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod env;
pub mod lifecycle;
pub mod logging;

pub use lifecycle::{startup, Config, Daemon, LifecycleError};

use tokio::signal::unix::{signal, SignalKind};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Cancel `shutdown` on the first SIGTERM or SIGINT.
pub fn spawn_signal_handler(shutdown: CancellationToken) -> Result<(), LifecycleError> {
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
            _ = sigint.recv() => info!("Received SIGINT, shutting down..."),
            _ = shutdown.cancelled() => {}
        }
        shutdown.cancel();
    });
    Ok(())
}

/// Start the daemon and run it until a signal arrives.
pub async fn run_until_signal(config: &Config) -> Result<(), LifecycleError> {
    let daemon = startup(config)?;
    let shutdown = CancellationToken::new();
    spawn_signal_handler(shutdown.clone())?;
    info!(
        pid = std::process::id(),
        interval_ms = config.reconcile_interval.as_millis() as u64,
        "Daemon ready"
    );
    daemon.run(shutdown).await
}
