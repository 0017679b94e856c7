// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cron scheduling engines

mod tokio_engine;

pub use tokio_engine::TokioCronEngine;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeEntry, FakeSchedulingEngine};

use devagent_core::{CronSchedule, JobTimezone};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Future returned by a firing callback
pub type CallbackFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Invoked once per firing. Each invocation runs as its own task.
pub type JobCallback = Arc<dyn Fn() -> CallbackFuture + Send + Sync + 'static>;

/// Opaque handle for a registered entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry-{}", self.0)
    }
}

/// Fires callbacks at the times a cron schedule names.
pub trait SchedulingEngine: Send + Sync + 'static {
    /// Start firing `callback` on `schedule` evaluated in `tz`.
    fn register(&self, schedule: CronSchedule, tz: JobTimezone, callback: JobCallback) -> EntryId;

    /// Stop future firings. Returns false for unknown handles.
    /// Firings already in progress are not interrupted.
    fn unregister(&self, id: EntryId) -> bool;
}
