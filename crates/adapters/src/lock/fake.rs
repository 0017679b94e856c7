// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake execution lock for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{InstanceLock, LockError};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Default)]
struct FakeLockState {
    held: HashSet<String>,
    acquired: Vec<String>,
}

/// In-memory lock table; clones share state.
#[derive(Clone, Default)]
pub struct FakeInstanceLock {
    inner: Arc<Mutex<FakeLockState>>,
}

impl FakeInstanceLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold `job_name` as if another process were running it.
    pub fn hold(&self, job_name: &str) -> FakeLockGuard {
        self.inner.lock().held.insert(job_name.to_string());
        FakeLockGuard {
            name: job_name.to_string(),
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn is_held(&self, job_name: &str) -> bool {
        self.inner.lock().held.contains(job_name)
    }

    /// Names successfully acquired through `try_acquire`, in order
    pub fn acquired(&self) -> Vec<String> {
        self.inner.lock().acquired.clone()
    }
}

impl InstanceLock for FakeInstanceLock {
    type Guard = FakeLockGuard;

    fn try_acquire(&self, job_name: &str) -> Result<FakeLockGuard, LockError> {
        let mut state = self.inner.lock();
        if !state.held.insert(job_name.to_string()) {
            return Err(LockError::AlreadyRunning(job_name.to_string()));
        }
        state.acquired.push(job_name.to_string());
        Ok(FakeLockGuard {
            name: job_name.to_string(),
            inner: Arc::clone(&self.inner),
        })
    }
}

/// Releases the fake lock on drop
pub struct FakeLockGuard {
    name: String,
    inner: Arc<Mutex<FakeLockState>>,
}

impl Drop for FakeLockGuard {
    fn drop(&mut self) {
        self.inner.lock().held.remove(&self.name);
    }
}
