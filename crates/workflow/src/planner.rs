// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Natural-language job planning.
//!
//! A [`Planner`] turns a description such as
//! `"every weekday at 9am in repo ~/src/app; run make test"` into a
//! [`Plan`]: name, repo, cron expression, timezone and steps. Explicit
//! hints in the [`PlanRequest`] always win over anything derived from the
//! text.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Timezone used when a request names none
pub const DEFAULT_TIMEZONE: &str = "Local";

/// Name used when the description yields no usable slug
pub const FALLBACK_NAME: &str = "devagent-job";

/// Longest name derived from a description
const MAX_NAME_LEN: usize = 40;

/// Errors that can occur while planning
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("description is empty")]
    EmptySpec,
    #[error("unable to derive a cron expression from the description; provide --cron")]
    NoCron,
    #[error("no steps found in the description; provide --step")]
    NoSteps,
}

/// A description plus explicit values that override whatever is derived.
#[derive(Debug, Clone, Default)]
pub struct PlanRequest {
    pub spec: String,
    pub name: Option<String>,
    pub cron: Option<String>,
    pub repo: Option<String>,
    pub timezone: Option<String>,
    pub steps: Vec<String>,
}

/// A resolved job plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub name: String,
    /// None when neither the request nor the description names a repo
    pub repo: Option<String>,
    pub cron: String,
    /// The trimmed description the plan came from
    pub natural: String,
    pub timezone: String,
    pub steps: Vec<String>,
}

/// Turns natural-language descriptions into job plans.
pub trait Planner {
    fn plan(&self, request: &PlanRequest) -> Result<Plan, PlanError>;
}

/// Pattern-based planner that needs no external service.
///
/// Recognized phrases:
/// - `every day at H[:MM][am|pm]` → `M H * * *`
/// - `every weekday at H[:MM][am|pm]` → `M H * * 1-5`
/// - anything mentioning `hour` → `0 * * * *`
/// - `repo <path>` for the repository
/// - `;`-separated clauses starting with `run ` for the steps
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicPlanner;

impl Planner for HeuristicPlanner {
    fn plan(&self, request: &PlanRequest) -> Result<Plan, PlanError> {
        let spec = request.spec.trim();
        if spec.is_empty() {
            return Err(PlanError::EmptySpec);
        }

        let cron = match non_empty(&request.cron) {
            Some(cron) => cron,
            None => parse_common_cron(spec).ok_or(PlanError::NoCron)?,
        };

        let steps = if request.steps.is_empty() {
            extract_steps(spec)
        } else {
            request.steps.clone()
        };
        if steps.is_empty() {
            return Err(PlanError::NoSteps);
        }

        Ok(Plan {
            name: non_empty(&request.name).unwrap_or_else(|| name_from_spec(spec)),
            repo: non_empty(&request.repo).or_else(|| extract_repo(spec)),
            cron,
            natural: spec.to_string(),
            timezone: non_empty(&request.timezone)
                .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
            steps,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// Allow expect here as the regexes are compile-time verified to be valid
#[allow(clippy::expect_used)]
static DAILY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)every\s+day\s+at\s+(\d{1,2})(?::(\d{2}))?\s*(am|pm)?")
        .expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static WEEKDAY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)every\s+weekday\s+at\s+(\d{1,2})(?::(\d{2}))?\s*(am|pm)?")
        .expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static REPO_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)repo\s+([~./\w-]+)").expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static NON_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("constant regex pattern is valid"));

/// Cron expression for the common phrasings, if one matches.
pub fn parse_common_cron(spec: &str) -> Option<String> {
    for (pattern, weekdays) in [(&*DAILY_PATTERN, false), (&*WEEKDAY_PATTERN, true)] {
        let Some(caps) = pattern.captures(spec) else {
            continue;
        };
        let hour = to_24_hour(&caps[1], caps.get(3).map(|m| m.as_str()));
        let minute: u32 = caps.get(2).and_then(|m| m.as_str().parse().ok()).unwrap_or(0);
        let dow = if weekdays { "1-5" } else { "*" };
        return Some(format!("{minute} {hour} * * {dow}"));
    }
    if spec.to_lowercase().contains("hour") {
        return Some("0 * * * *".to_string());
    }
    None
}

fn to_24_hour(hour: &str, meridiem: Option<&str>) -> u32 {
    let hour = hour.parse::<u32>().map(|h| h % 24).unwrap_or(0);
    match meridiem.map(str::to_lowercase).as_deref() {
        Some("pm") if hour < 12 => hour + 12,
        Some("am") if hour == 12 => 0,
        _ => hour,
    }
}

/// Path following the word `repo`, if any.
pub fn extract_repo(spec: &str) -> Option<String> {
    REPO_PATTERN.captures(spec).map(|caps| caps[1].to_string())
}

/// Commands from `;`-separated clauses that start with `run `.
pub fn extract_steps(spec: &str) -> Vec<String> {
    spec.split(';')
        .map(str::trim)
        .filter_map(|clause| {
            let (verb, rest) = clause.split_at_checked(4)?;
            verb.eq_ignore_ascii_case("run ")
                .then(|| rest.trim().trim_matches('\'').to_string())
        })
        .filter(|cmd| !cmd.is_empty())
        .collect()
}

/// Lower-case slug of the description, at most 40 characters.
pub fn name_from_spec(spec: &str) -> String {
    let lower = spec.to_lowercase();
    let slug = NON_SLUG.replace_all(&lower, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        return FALLBACK_NAME.to_string();
    }
    // The slug is ASCII, so byte truncation is safe
    slug[..slug.len().min(MAX_NAME_LEN)]
        .trim_end_matches('-')
        .to_string()
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod tests;
