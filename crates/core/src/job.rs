// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted job descriptor: a named schedule bound to a workflow file.

use crate::run::RunStatus;
use crate::timezone::{resolve_timezone, JobTimezone};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A scheduled workflow.
///
/// `name` is the stable identity. Only `last_status`/`last_run` change as a
/// result of runs; everything else is owned by whoever registered the job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub name: String,
    pub repo: String,
    pub cron: String,
    /// Free-form description the schedule was written from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub natural: Option<String>,
    #[serde(default)]
    pub timezone: String,
    /// Workflow file executed when the job fires
    pub spec_path: PathBuf,
    #[serde(default)]
    pub last_status: Option<RunStatus>,
    #[serde(default)]
    pub last_run: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Job {
    pub fn new(
        name: impl Into<String>,
        repo: impl Into<String>,
        cron: impl Into<String>,
        timezone: impl Into<String>,
        spec_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            repo: repo.into(),
            cron: cron.into(),
            natural: None,
            timezone: timezone.into(),
            spec_path: spec_path.into(),
            last_status: None,
            last_run: None,
            updated_at: None,
        }
    }

    pub fn with_natural(mut self, natural: impl Into<String>) -> Self {
        self.natural = Some(natural.into());
        self
    }

    /// Resolved timezone; unknown names fall back to local time.
    pub fn resolved_timezone(&self) -> JobTimezone {
        resolve_timezone(&self.timezone)
    }

    /// Record the outcome of a run.
    pub fn record_run(&mut self, status: RunStatus, at: DateTime<Utc>) {
        self.last_status = Some(status);
        self.last_run = Some(at);
        self.updated_at = Some(at);
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
