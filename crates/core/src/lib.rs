// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! devagent-core: shared model for the devagent job daemon

pub mod clock;
pub mod job;
pub mod run;
pub mod schedule;
pub mod time_fmt;
pub mod timezone;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, SystemClock};
pub use job::Job;
pub use run::{RunStatus, RunSummary, StepSummary};
pub use schedule::{CronSchedule, ScheduleError};
pub use time_fmt::{format_elapsed, run_stamp};
pub use timezone::{resolve_timezone, JobTimezone};

#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;
