// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::Job;
use std::path::Path;

/// Job with a UTC timezone whose workflow lives at `<repo>/.devagent.yml`.
pub fn utc_job(name: &str, cron: &str, repo: &Path) -> Job {
    Job::new(
        name,
        repo.display().to_string(),
        cron,
        "UTC",
        repo.join(".devagent.yml"),
    )
}
