// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job repository capability

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use devagent_core::{Job, RunStatus};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from job repository operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt job store {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("job store unavailable: {0}")]
    Unavailable(String),
}

/// Durable store of job descriptors, as seen by the scheduler.
#[async_trait]
pub trait JobRepository: Send + Sync + 'static {
    /// Every job that should be scheduled. No ordering guarantee.
    async fn list_scheduled(&self) -> Result<Vec<Job>, StoreError>;

    /// Persist the outcome of a run. Unknown names are ignored.
    async fn update_run_result(
        &self,
        name: &str,
        status: RunStatus,
        at: DateTime<Utc>,
    ) -> Result<(), StoreError>;
}
