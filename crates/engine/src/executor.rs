// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock-guarded job execution

use crate::runner::{RunError, RunOptions, RunOutcome, Runner};
use devagent_adapters::{CallbackFuture, InstanceLock, JobCallback, LockError};
use devagent_core::{Clock, Job, JobTimezone, RunStatus};
use devagent_storage::JobRepository;
use devagent_workflow::{LoadError, WorkflowLoader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while executing a job
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error(transparent)]
    Lock(#[from] LockError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Run(#[from] RunError),
}

/// Result of one execution attempt
#[derive(Debug)]
pub enum Execution {
    /// Another execution of the same job held the lock
    Skipped,
    Finished(RunOutcome),
}

/// Runs jobs under their execution lock and records the outcome.
pub struct JobExecutor<L, W, R, C: Clock> {
    locks: L,
    loader: W,
    jobs: Arc<R>,
    runner: Runner<C>,
    clock: C,
}

impl<L, W, R, C> JobExecutor<L, W, R, C>
where
    L: InstanceLock,
    W: WorkflowLoader,
    R: JobRepository,
    C: Clock,
{
    pub fn new(locks: L, loader: W, jobs: Arc<R>, clock: C) -> Self {
        Self {
            locks,
            loader,
            jobs,
            runner: Runner::new(clock.clone()),
            clock,
        }
    }

    /// Execute `job_name` from the workflow at `spec_path`.
    ///
    /// Returns [`Execution::Skipped`] without loading anything when the
    /// job is already running. The lock is held until the run finishes and
    /// its result is recorded. A run that errors after the workflow loaded
    /// is recorded as failed.
    pub async fn execute(
        &self,
        job_name: &str,
        spec_path: &Path,
        opts: RunOptions,
    ) -> Result<Execution, ExecuteError> {
        let guard = match self.locks.try_acquire(job_name) {
            Ok(guard) => guard,
            Err(LockError::AlreadyRunning(_)) => {
                tracing::info!(job = job_name, "job already running, skipping");
                return Ok(Execution::Skipped);
            }
            Err(e) => return Err(e.into()),
        };

        let workflow = self.loader.load(spec_path)?;
        let outcome = match self.runner.run(&workflow, opts).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.record(job_name, RunStatus::Failed).await;
                return Err(e.into());
            }
        };

        self.record(job_name, outcome.status()).await;

        drop(guard);
        Ok(Execution::Finished(outcome))
    }

    /// Persist a run result. A store failure is logged, not returned.
    async fn record(&self, job_name: &str, status: RunStatus) {
        if let Err(e) = self.jobs.update_run_result(job_name, status, self.clock.now()).await {
            tracing::warn!(job = job_name, %status, error = %e, "failed to record run result");
        }
    }

    /// Execute from a scheduler firing, logging instead of returning errors.
    pub async fn execute_scheduled(&self, job_name: &str, spec_path: &Path, tz: JobTimezone) {
        tracing::info!(
            job = job_name,
            local_time = %tz.format_local(self.clock.now()),
            "scheduled run triggered"
        );
        match self.execute(job_name, spec_path, RunOptions::default()).await {
            Ok(Execution::Skipped) => {}
            Ok(Execution::Finished(outcome)) => tracing::info!(
                job = job_name,
                status = %outcome.status(),
                run_dir = %outcome.run_dir.display(),
                "job finished"
            ),
            Err(e) => tracing::error!(job = job_name, error = %e, "scheduled run failed"),
        }
    }
}

/// Builds the callback a cron entry fires for a job.
pub trait Dispatch: Send + Sync + 'static {
    fn callback(&self, job: &Job, tz: JobTimezone) -> JobCallback;
}

impl<L, W, R, C> Dispatch for Arc<JobExecutor<L, W, R, C>>
where
    L: InstanceLock,
    W: WorkflowLoader,
    R: JobRepository,
    C: Clock,
{
    fn callback(&self, job: &Job, tz: JobTimezone) -> JobCallback {
        let executor = Arc::clone(self);
        let name = job.name.clone();
        let spec_path: PathBuf = job.spec_path.clone();
        Arc::new(move || -> CallbackFuture {
            let executor = Arc::clone(&executor);
            let name = name.clone();
            let spec_path = spec_path.clone();
            Box::pin(async move {
                executor.execute_scheduled(&name, &spec_path, tz).await;
            })
        })
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
