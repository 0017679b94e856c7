// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;
use std::time::Duration;

use devagent_engine::RECONCILE_INTERVAL;

use crate::lifecycle::LifecycleError;

/// Resolve state directory: DEVAGENT_STATE_DIR > ~/.devagent
pub fn state_dir() -> Result<PathBuf, LifecycleError> {
    if let Some(dir) = std::env::var_os("DEVAGENT_STATE_DIR").filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().ok_or(LifecycleError::NoStateDir)?;
    Ok(home.join(".devagent"))
}

/// Reconcile interval: DEVAGENT_RECONCILE_MS > 30s
pub fn reconcile_interval() -> Duration {
    std::env::var("DEVAGENT_RECONCILE_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(RECONCILE_INTERVAL)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
