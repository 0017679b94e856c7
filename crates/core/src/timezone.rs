// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timezone resolution for job schedules.

use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;
use std::fmt;

/// Timezone a job's cron expression is evaluated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobTimezone {
    /// Host local time
    Local,
    Utc,
    /// IANA zone such as `America/New_York`
    Named(Tz),
}

impl JobTimezone {
    /// Render a UTC instant as wall-clock text in this zone.
    pub fn format_local(&self, at: DateTime<Utc>) -> String {
        match self {
            JobTimezone::Local => at.with_timezone(&Local).to_rfc3339(),
            JobTimezone::Utc => at.to_rfc3339(),
            JobTimezone::Named(tz) => at.with_timezone(tz).to_rfc3339(),
        }
    }
}

impl fmt::Display for JobTimezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobTimezone::Local => write!(f, "local"),
            JobTimezone::Utc => write!(f, "utc"),
            JobTimezone::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}

/// Map a human-written timezone to a [`JobTimezone`].
///
/// Empty and `local` (any case) mean host local time, `utc` means UTC.
/// Anything else is looked up as an IANA name; unknown names fall back
/// to local time without error.
pub fn resolve_timezone(name: &str) -> JobTimezone {
    let trimmed = name.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "" | "local" => JobTimezone::Local,
        "utc" => JobTimezone::Utc,
        _ => trimmed
            .parse::<Tz>()
            .map(JobTimezone::Named)
            .unwrap_or(JobTimezone::Local),
    }
}

#[cfg(test)]
#[path = "timezone_tests.rs"]
mod tests;
