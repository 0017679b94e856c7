// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: lock files, cron timers, child processes

pub mod cron;
pub mod lock;
pub mod subprocess;

pub use cron::{CallbackFuture, EntryId, JobCallback, SchedulingEngine, TokioCronEngine};
pub use lock::{lock_file_name, FileLockAdapter, FileLockGuard, InstanceLock, LockError};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use cron::{FakeEntry, FakeSchedulingEngine};
#[cfg(any(test, feature = "test-support"))]
pub use lock::{FakeInstanceLock, FakeLockGuard};
