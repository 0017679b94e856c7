// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow definition

use crate::expand::{expand_repo_path, ExpandError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A job's workflow: where to run and what to run, in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub repo: String,
    #[serde(default)]
    pub schedule: Schedule,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<OutputSpec>,
}

/// When the workflow runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub natural: Option<String>,
    #[serde(default)]
    pub cron: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// A single shell command
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub run: String,
}

impl Step {
    pub fn new(run: impl Into<String>) -> Self {
        Self { run: run.into() }
    }
}

/// Files copied from the repo into the run directory after the steps finish
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub copy_if_exists: Vec<String>,
}

impl Workflow {
    /// Resolve `repo` to a normalized absolute-or-relative path.
    ///
    /// Expands a leading `~` and `$VAR`/`${VAR}` references. Existence is
    /// not checked here.
    pub fn resolve_repo(&self) -> Result<PathBuf, ExpandError> {
        expand_repo_path(&self.repo)
    }

    /// Output paths to copy, with blanks dropped.
    pub fn output_candidates(&self) -> impl Iterator<Item = &str> {
        self.outputs
            .iter()
            .flat_map(|o| o.copy_if_exists.iter())
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
