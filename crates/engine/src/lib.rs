// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! devagent execution engine: redaction, step runner, executor, reconciler

pub mod artifacts;
mod executor;
pub mod redact;
mod reconciler;
mod runner;

pub use artifacts::ArtifactError;
pub use executor::{Dispatch, ExecuteError, Execution, JobExecutor};
pub use reconciler::{ReconcileReport, Reconciler, RECONCILE_INTERVAL};
pub use redact::{redact, LineRedactor};
pub use runner::{RunError, RunOptions, RunOutcome, Runner};
