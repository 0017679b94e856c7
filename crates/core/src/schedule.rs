// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Five-field cron expressions evaluated in a job's timezone.
//!
//! Fields are `minute hour day-of-month month day-of-week` with standard
//! semantics: day-of-week accepts 0-7 (0 and 7 are Sunday) and when both
//! day fields are restricted a match on either one fires.

use crate::timezone::JobTimezone;
use chrono::{DateTime, Local, TimeZone, Utc};
use croner::Cron;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors from parsing a cron expression
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("cron expression must have 5 fields, got {count}: {expr:?}")]
    FieldCount { expr: String, count: usize },

    #[error("invalid cron expression {expr:?}: {message}")]
    Invalid { expr: String, message: String },
}

/// A parsed cron expression.
#[derive(Clone)]
pub struct CronSchedule {
    expr: String,
    cron: Arc<Cron>,
}

impl CronSchedule {
    /// Parse a 5-field expression. Seconds fields and `@` nicknames are rejected.
    pub fn parse(expr: &str) -> Result<Self, ScheduleError> {
        let expr = expr.trim();
        let count = expr.split_whitespace().count();
        if count != 5 {
            return Err(ScheduleError::FieldCount {
                expr: expr.to_string(),
                count,
            });
        }
        let cron = Cron::new(expr)
            .parse()
            .map_err(|e| ScheduleError::Invalid {
                expr: expr.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            expr: expr.to_string(),
            cron: Arc::new(cron),
        })
    }

    pub fn expr(&self) -> &str {
        &self.expr
    }

    /// Next firing strictly after `after`, evaluated in `tz`.
    ///
    /// Returns `None` when the expression has no future occurrence.
    pub fn next_after(&self, tz: &JobTimezone, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match tz {
            JobTimezone::Local => self.next_in(&Local, after),
            JobTimezone::Utc => self.next_in(&Utc, after),
            JobTimezone::Named(zone) => self.next_in(zone, after),
        }
    }

    fn next_in<Z: TimeZone>(&self, zone: &Z, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let local_after = after.with_timezone(zone);
        self.cron
            .find_next_occurrence(&local_after, false)
            .ok()
            .map(|next| next.with_timezone(&Utc))
    }
}

impl fmt::Debug for CronSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CronSchedule").field(&self.expr).finish()
    }
}

impl fmt::Display for CronSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expr)
    }
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
