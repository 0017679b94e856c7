// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Format a past instant relative to `now` (e.g., "5s ago", "2m ago").
///
/// `None` renders as "never". Instants in the future count as zero.
pub fn format_time_ago(at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(at) = at else {
        return "never".to_string();
    };
    let elapsed_secs = (now - at).num_seconds().max(0) as u64;
    format!("{} ago", devagent_core::format_elapsed(elapsed_secs))
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
