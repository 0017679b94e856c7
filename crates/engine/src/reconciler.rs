// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Keeps cron registrations in step with the job repository.
//!
//! Each pass diffs the repository against the entries registered so far.
//! New jobs are parsed and registered, vanished jobs are unregistered, and
//! jobs that are already registered are left alone even if their
//! definition changed. Remove and re-add a job to change its trigger.

use crate::executor::Dispatch;
use devagent_adapters::{EntryId, SchedulingEngine};
use devagent_core::CronSchedule;
use devagent_storage::{JobRepository, StoreError};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Default time between passes
pub const RECONCILE_INTERVAL: Duration = Duration::from_secs(30);

/// What one pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    /// Jobs that could not be scheduled, with the reason
    pub failed: Vec<(String, String)>,
}

impl ReconcileReport {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.failed.is_empty()
    }
}

pub struct Reconciler<E, R, D> {
    engine: Arc<E>,
    jobs: Arc<R>,
    dispatch: D,
    entries: HashMap<String, EntryId>,
}

impl<E, R, D> Reconciler<E, R, D>
where
    E: SchedulingEngine,
    R: JobRepository,
    D: Dispatch,
{
    pub fn new(engine: Arc<E>, jobs: Arc<R>, dispatch: D) -> Self {
        Self {
            engine,
            jobs,
            dispatch,
            entries: HashMap::new(),
        }
    }

    /// Names of registered jobs, sorted
    pub fn scheduled(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn entry(&self, job_name: &str) -> Option<EntryId> {
        self.entries.get(job_name).copied()
    }

    /// One reconciliation pass.
    ///
    /// A repository failure aborts the pass with no changes. A job with an
    /// invalid cron expression is reported in `failed` and retried next pass.
    pub async fn reconcile(&mut self) -> Result<ReconcileReport, StoreError> {
        let desired = self.jobs.list_scheduled().await?;
        let mut report = ReconcileReport::default();
        let mut wanted = HashSet::with_capacity(desired.len());

        for job in &desired {
            wanted.insert(job.name.as_str());
            if self.entries.contains_key(&job.name) {
                continue;
            }

            let schedule = match CronSchedule::parse(&job.cron) {
                Ok(schedule) => schedule,
                Err(e) => {
                    tracing::warn!(job = %job.name, cron = %job.cron, error = %e, "cannot schedule job");
                    report.failed.push((job.name.clone(), e.to_string()));
                    continue;
                }
            };
            let tz = job.resolved_timezone();
            let id = self
                .engine
                .register(schedule, tz, self.dispatch.callback(job, tz));
            tracing::info!(job = %job.name, cron = %job.cron, timezone = %tz, entry = %id, "scheduled job");
            self.entries.insert(job.name.clone(), id);
            report.added.push(job.name.clone());
        }

        let stale: Vec<String> = self
            .entries
            .keys()
            .filter(|name| !wanted.contains(name.as_str()))
            .cloned()
            .collect();
        for name in stale {
            if let Some(id) = self.entries.remove(&name) {
                self.engine.unregister(id);
                tracing::info!(job = %name, entry = %id, "unscheduled job");
                report.removed.push(name);
            }
        }

        report.added.sort();
        report.removed.sort();
        report.failed.sort();
        Ok(report)
    }

    /// Reconcile now, then every `interval` until `shutdown` is cancelled.
    pub async fn run(mut self, interval: Duration, shutdown: CancellationToken) {
        self.tick().await;

        let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => self.tick().await,
            }
        }
        tracing::info!(scheduled = self.entries.len(), "reconciler stopped");
    }

    async fn tick(&mut self) {
        match self.reconcile().await {
            Ok(report) if report.is_empty() => tracing::debug!("reconcile: no changes"),
            Ok(report) => tracing::info!(
                added = report.added.len(),
                removed = report.removed.len(),
                failed = report.failed.len(),
                scheduled = self.entries.len(),
                "reconcile complete"
            ),
            Err(e) => tracing::warn!(error = %e, "failed to list jobs, skipping reconcile"),
        }
    }
}

#[cfg(test)]
#[path = "reconciler_tests.rs"]
mod tests;
