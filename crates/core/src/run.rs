// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run summary model persisted as `summary.json`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Final outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Failed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Success => "success",
            RunStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(RunStatus::Success),
            "failed" => Ok(RunStatus::Failed),
            other => Err(format!("unknown run status: {other}")),
        }
    }
}

/// One executed step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSummary {
    pub cmd: String,
    pub exit_code: i32,
    pub duration_sec: f64,
}

impl StepSummary {
    pub fn new(cmd: impl Into<String>, exit_code: i32, duration: Duration) -> Self {
        Self {
            cmd: cmd.into(),
            exit_code,
            duration_sec: duration.as_secs_f64(),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

/// Canonical record of one run. Field order here is the on-disk order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub name: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub status: RunStatus,
    pub steps: Vec<StepSummary>,
    pub repo: String,
}

impl RunSummary {
    /// Start a summary; `ended_at` is provisional until [`RunSummary::finish`].
    pub fn begin(name: impl Into<String>, repo: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            started_at,
            ended_at: started_at,
            status: RunStatus::Success,
            steps: Vec::new(),
            repo: repo.into(),
        }
    }

    pub fn record(&mut self, step: StepSummary) {
        self.steps.push(step);
    }

    /// Seal the summary. Success only if every attempted step exited 0.
    pub fn finish(&mut self, ended_at: DateTime<Utc>) {
        self.ended_at = ended_at;
        self.status = if self.steps.iter().all(StepSummary::succeeded) {
            RunStatus::Success
        } else {
            RunStatus::Failed
        };
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
