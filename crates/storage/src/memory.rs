// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory job repository for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use crate::{JobRepository, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use devagent_core::{Job, RunStatus};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Recorded `update_run_result` call
#[derive(Debug, Clone, PartialEq)]
pub struct RunResultCall {
    pub name: String,
    pub status: RunStatus,
    pub at: DateTime<Utc>,
}

#[derive(Default)]
struct MemoryState {
    jobs: BTreeMap<String, Job>,
    fail_lists: usize,
    results: Vec<RunResultCall>,
}

/// Fake repository; clones share state.
#[derive(Clone, Default)]
pub struct MemoryJobRepository {
    inner: Arc<Mutex<MemoryState>>,
}

impl MemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jobs(jobs: impl IntoIterator<Item = Job>) -> Self {
        let repo = Self::new();
        for job in jobs {
            repo.put(job);
        }
        repo
    }

    pub fn put(&self, job: Job) {
        self.inner.lock().jobs.insert(job.name.clone(), job);
    }

    pub fn delete(&self, name: &str) {
        self.inner.lock().jobs.remove(name);
    }

    pub fn get(&self, name: &str) -> Option<Job> {
        self.inner.lock().jobs.get(name).cloned()
    }

    /// Make the next `count` listings fail.
    pub fn fail_next_lists(&self, count: usize) {
        self.inner.lock().fail_lists = count;
    }

    /// All recorded run results, oldest first
    pub fn results(&self) -> Vec<RunResultCall> {
        self.inner.lock().results.clone()
    }
}

#[async_trait]
impl JobRepository for MemoryJobRepository {
    async fn list_scheduled(&self) -> Result<Vec<Job>, StoreError> {
        let mut state = self.inner.lock();
        if state.fail_lists > 0 {
            state.fail_lists -= 1;
            return Err(StoreError::Unavailable("injected list failure".to_string()));
        }
        Ok(state.jobs.values().cloned().collect())
    }

    async fn update_run_result(
        &self,
        name: &str,
        status: RunStatus,
        at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut state = self.inner.lock();
        state.results.push(RunResultCall {
            name: name.to_string(),
            status,
            at,
        });
        if let Some(job) = state.jobs.get_mut(name) {
            job.record_run(status, at);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
