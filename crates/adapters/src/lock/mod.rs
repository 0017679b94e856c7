// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-job execution locks

mod file;

pub use file::{FileLockAdapter, FileLockGuard};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeInstanceLock, FakeLockGuard};

use std::path::PathBuf;
use thiserror::Error;

/// Errors from acquiring an execution lock
#[derive(Debug, Error)]
pub enum LockError {
    /// Another execution holds the lock. Callers treat this as a skip.
    #[error("job {0:?} is already running")]
    AlreadyRunning(String),

    #[error("lock file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Non-blocking mutual exclusion keyed by job name.
///
/// The guard holds the lock until it is dropped.
pub trait InstanceLock: Send + Sync + 'static {
    type Guard: Send + 'static;

    fn try_acquire(&self, job_name: &str) -> Result<Self::Guard, LockError>;
}

/// File name used for a job's lock.
///
/// Lowercases the name and replaces path-hostile sequences with `-`.
pub fn lock_file_name(job_name: &str) -> String {
    let mut name = job_name.to_lowercase();
    for pattern in [" ", "/", "\\", ":", ".."] {
        name = name.replace(pattern, "-");
    }
    format!("{name}.lock")
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
