// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup, run loop, shutdown.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use devagent_adapters::{FileLockAdapter, TokioCronEngine};
use devagent_core::SystemClock;
use devagent_engine::{JobExecutor, Reconciler};
use devagent_storage::{JsonJobStore, StoreError};
use devagent_workflow::YamlWorkflowLoader;
use fs2::FileExt;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::env;

/// Executor with the concrete adapters the daemon uses
pub type DaemonExecutor = JobExecutor<FileLockAdapter, YamlWorkflowLoader, JsonJobStore, SystemClock>;

pub type DaemonEngine = TokioCronEngine<SystemClock>;

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Root state directory (e.g. ~/.devagent)
    pub state_dir: PathBuf,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    /// Path to daemon log file
    pub log_path: PathBuf,
    /// Path to the job store
    pub jobs_path: PathBuf,
    /// Directory of per-job execution lock files
    pub locks_dir: PathBuf,
    /// Time between reconcile passes
    pub reconcile_interval: Duration,
}

impl Config {
    /// Load configuration from the environment.
    pub fn load() -> Result<Self, LifecycleError> {
        let mut config = Self::for_state_dir(env::state_dir()?);
        config.reconcile_interval = env::reconcile_interval();
        Ok(config)
    }

    /// Fixed layout under `state_dir`.
    pub fn for_state_dir(state_dir: impl Into<PathBuf>) -> Self {
        let state_dir = state_dir.into();
        Self {
            lock_path: state_dir.join("daemon.pid"),
            log_path: state_dir.join("daemon.log"),
            jobs_path: state_dir.join("jobs.json"),
            locks_dir: state_dir.join("locks"),
            reconcile_interval: devagent_engine::RECONCILE_INTERVAL,
            state_dir,
        }
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("Failed to acquire lock: daemon already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("Job store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Running daemon.
pub struct Daemon {
    pub config: Config,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
    pub store: Arc<JsonJobStore>,
    pub engine: Arc<DaemonEngine>,
    pub executor: Arc<DaemonExecutor>,
    pub start_time: Instant,
}

/// Start the daemon: take the single-instance lock and wire the adapters.
pub fn startup(config: &Config) -> Result<Daemon, LifecycleError> {
    match startup_inner(config) {
        Ok(daemon) => Ok(daemon),
        Err(e) => {
            // The pid file belongs to the running daemon when the lock was held
            if !matches!(e, LifecycleError::LockFailed(_)) {
                cleanup_on_failure(config);
            }
            Err(e)
        }
    }
}

fn startup_inner(config: &Config) -> Result<Daemon, LifecycleError> {
    std::fs::create_dir_all(&config.state_dir)?;

    // Don't truncate before holding the lock; that would wipe the running daemon's PID
    let mut lock_file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&config.lock_path)?;
    lock_file
        .try_lock_exclusive()
        .map_err(LifecycleError::LockFailed)?;
    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;

    std::fs::create_dir_all(&config.locks_dir)?;
    let store = Arc::new(JsonJobStore::open(&config.jobs_path)?);
    let job_count = store.list()?.len();

    let executor = Arc::new(JobExecutor::new(
        FileLockAdapter::new(&config.locks_dir),
        YamlWorkflowLoader,
        Arc::clone(&store),
        SystemClock,
    ));
    let engine = Arc::new(TokioCronEngine::new(SystemClock));

    info!(
        state_dir = %config.state_dir.display(),
        jobs = job_count,
        "daemon started"
    );

    Ok(Daemon {
        config: config.clone(),
        lock_file,
        store,
        engine,
        executor,
        start_time: Instant::now(),
    })
}

fn cleanup_on_failure(config: &Config) {
    remove_if_exists(&config.lock_path, "PID file");
}

fn remove_if_exists(path: &Path, what: &str) {
    if path.exists() {
        if let Err(e) = std::fs::remove_file(path) {
            warn!(path = %path.display(), error = %e, "failed to remove {what}");
        }
    }
}

impl Daemon {
    /// Reconcile until `shutdown` fires, then wait for in-flight runs.
    pub async fn run(mut self, shutdown: CancellationToken) -> Result<(), LifecycleError> {
        let reconciler = Reconciler::new(
            Arc::clone(&self.engine),
            Arc::clone(&self.store),
            Arc::clone(&self.executor),
        );
        let reconcile = tokio::spawn(reconciler.run(self.config.reconcile_interval, shutdown.clone()));

        shutdown.cancelled().await;
        if let Err(e) = reconcile.await {
            warn!(error = %e, "reconciler task failed");
        }

        self.engine.shutdown();
        let tracker = self.engine.tracker();
        if !tracker.is_empty() {
            info!(in_flight = tracker.len(), "waiting for running jobs to finish");
        }
        tracker.wait().await;

        self.shutdown();
        Ok(())
    }

    /// Remove the PID file. The lock is released when the daemon drops.
    pub fn shutdown(&mut self) {
        info!(uptime_secs = self.start_time.elapsed().as_secs(), "Shutting down daemon...");
        remove_if_exists(&self.config.lock_path, "PID file");
        info!("Daemon shutdown complete");
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
