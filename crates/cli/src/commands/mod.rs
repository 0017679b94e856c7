// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod daemon;
pub mod init;
pub mod plan;
pub mod run;
pub mod schedule;

#[cfg(test)]
mod test_helpers;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use devagent_workflow::WORKFLOW_FILE;

/// Absolute workflow path: `file` if given, else `.devagent.yml` in `cwd`.
pub(crate) fn workflow_path(file: Option<&Path>, cwd: &Path) -> PathBuf {
    match file {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => cwd.join(path),
        None => cwd.join(WORKFLOW_FILE),
    }
}

pub(crate) fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().context("cannot determine current directory")
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
