// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake scheduling engine for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{EntryId, JobCallback, SchedulingEngine};
use devagent_core::{CronSchedule, JobTimezone};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Registered entry as seen by the fake
#[derive(Clone)]
pub struct FakeEntry {
    pub schedule: CronSchedule,
    pub tz: JobTimezone,
    callback: JobCallback,
}

#[derive(Default)]
struct FakeEngineState {
    next_id: u64,
    entries: BTreeMap<EntryId, FakeEntry>,
    registrations: usize,
    unregistrations: usize,
}

/// Records registrations; firings happen only through [`fire`](Self::fire).
#[derive(Clone, Default)]
pub struct FakeSchedulingEngine {
    inner: Arc<Mutex<FakeEngineState>>,
}

impl FakeSchedulingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> BTreeMap<EntryId, FakeEntry> {
        self.inner.lock().entries.clone()
    }

    pub fn entry(&self, id: EntryId) -> Option<FakeEntry> {
        self.inner.lock().entries.get(&id).cloned()
    }

    /// Total `register` calls so far
    pub fn registrations(&self) -> usize {
        self.inner.lock().registrations
    }

    /// Total successful `unregister` calls so far
    pub fn unregistrations(&self) -> usize {
        self.inner.lock().unregistrations
    }

    /// Run one firing of `id` to completion. Returns false for unknown ids.
    pub async fn fire(&self, id: EntryId) -> bool {
        let callback = self.inner.lock().entries.get(&id).map(|e| e.callback.clone());
        match callback {
            Some(callback) => {
                callback().await;
                true
            }
            None => false,
        }
    }
}

impl SchedulingEngine for FakeSchedulingEngine {
    fn register(&self, schedule: CronSchedule, tz: JobTimezone, callback: JobCallback) -> EntryId {
        let mut state = self.inner.lock();
        state.next_id += 1;
        state.registrations += 1;
        let id = EntryId(state.next_id);
        state.entries.insert(
            id,
            FakeEntry {
                schedule,
                tz,
                callback,
            },
        );
        id
    }

    fn unregister(&self, id: EntryId) -> bool {
        let mut state = self.inner.lock();
        let removed = state.entries.remove(&id).is_some();
        if removed {
            state.unregistrations += 1;
        }
        removed
    }
}
