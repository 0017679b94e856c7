// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `devagent daemon` - run the scheduler in the foreground

use anyhow::{anyhow, Result};
use devagent_daemon::logging::init_stderr_logging;
use devagent_daemon::{run_until_signal, Config, LifecycleError};

pub async fn handle() -> Result<()> {
    init_stderr_logging();
    let config = Config::load()?;
    match run_until_signal(&config).await {
        Ok(()) => Ok(()),
        Err(LifecycleError::LockFailed(_)) => Err(anyhow!(
            "a devagent daemon is already running (lock held on {})",
            config.lock_path.display()
        )),
        Err(e) => Err(e.into()),
    }
}
