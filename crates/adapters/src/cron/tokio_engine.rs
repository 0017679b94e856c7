// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer-task scheduling engine on the tokio runtime

use super::{EntryId, JobCallback, SchedulingEngine};
use devagent_core::{Clock, CronSchedule, JobTimezone};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;

/// One timer task per registered entry.
///
/// Each timer sleeps until the next occurrence, then spawns the callback
/// on a [`TaskTracker`] so shutdown can wait for in-flight runs while the
/// timers themselves are aborted.
pub struct TokioCronEngine<C: Clock> {
    clock: C,
    next_id: AtomicU64,
    timers: Mutex<HashMap<EntryId, JoinHandle<()>>>,
    tracker: TaskTracker,
}

impl<C: Clock> TokioCronEngine<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            next_id: AtomicU64::new(1),
            timers: Mutex::new(HashMap::new()),
            tracker: TaskTracker::new(),
        }
    }

    /// Tracker holding every spawned firing
    pub fn tracker(&self) -> TaskTracker {
        self.tracker.clone()
    }

    pub fn entry_count(&self) -> usize {
        self.timers.lock().len()
    }

    /// Abort every timer and close the tracker. Running firings continue.
    pub fn shutdown(&self) {
        let timers: Vec<_> = self.timers.lock().drain().collect();
        for (_, handle) in timers {
            handle.abort();
        }
        self.tracker.close();
    }
}

impl<C: Clock> SchedulingEngine for TokioCronEngine<C> {
    fn register(&self, schedule: CronSchedule, tz: JobTimezone, callback: JobCallback) -> EntryId {
        let id = EntryId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let clock = self.clock.clone();
        let tracker = self.tracker.clone();

        let handle = tokio::spawn(async move {
            let mut last = clock.now();
            loop {
                let now = clock.now();
                let base = now.max(last);
                let Some(next) = schedule.next_after(&tz, base) else {
                    tracing::warn!(%id, cron = %schedule, "schedule has no future occurrence");
                    return;
                };
                let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
                tokio::time::sleep(wait).await;
                last = next;

                tracing::debug!(%id, cron = %schedule, at = %next, "cron entry fired");
                tracker.spawn(callback());
            }
        });

        self.timers.lock().insert(id, handle);
        id
    }

    fn unregister(&self, id: EntryId) -> bool {
        match self.timers.lock().remove(&id) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

impl<C: Clock> Drop for TokioCronEngine<C> {
    fn drop(&mut self) {
        for (_, handle) in self.timers.get_mut().drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
#[path = "tokio_engine_tests.rs"]
mod tests;
