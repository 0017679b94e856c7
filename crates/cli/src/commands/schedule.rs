// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `devagent schedule` - manage the jobs the daemon schedules
//!
//! Changes land in the job store; a running daemon picks them up on its
//! next reconcile pass.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use devagent_core::{CronSchedule, Job};
use devagent_daemon::Config;
use devagent_storage::JsonJobStore;
use devagent_workflow::{load_workflow, Workflow};
use serde_json::json;

use super::{current_dir, workflow_path};
use crate::output::{format_time_ago, print_json, OutputFormat};
use crate::table::{Column, Table};

/// Timezone recorded when a workflow names none
const DEFAULT_TIMEZONE: &str = "Local";

#[derive(Args)]
pub struct ScheduleArgs {
    #[command(subcommand)]
    pub command: ScheduleCommand,
}

#[derive(Subcommand)]
pub enum ScheduleCommand {
    /// List scheduled jobs and their last run
    List,
    /// Schedule the workflow in FILE, replacing any job with the same name
    Add {
        /// Workflow file (default: ./.devagent.yml)
        file: Option<PathBuf>,
    },
    /// Stop scheduling a job
    Remove {
        /// Job name
        name: String,
    },
}

pub fn handle(command: ScheduleCommand, config: &Config, format: OutputFormat) -> Result<()> {
    match command {
        ScheduleCommand::List => list(config, format),
        ScheduleCommand::Add { file } => {
            let path = workflow_path(file.as_deref(), &current_dir()?);
            let job = register(config, &path)?;
            match format {
                OutputFormat::Text => println!(
                    "scheduled {} (cron={}, timezone={})",
                    job.name, job.cron, job.timezone
                ),
                OutputFormat::Json => print_json(&job)?,
            }
            Ok(())
        }
        ScheduleCommand::Remove { name } => {
            remove(config, &name)?;
            match format {
                OutputFormat::Text => println!("removed {}", name),
                OutputFormat::Json => print_json(&json!({ "removed": name }))?,
            }
            Ok(())
        }
    }
}

fn list(config: &Config, format: OutputFormat) -> Result<()> {
    let jobs = open_store(config)?.list()?;
    match format {
        OutputFormat::Json => print_json(&jobs),
        OutputFormat::Text if jobs.is_empty() => {
            println!("no jobs scheduled");
            Ok(())
        }
        OutputFormat::Text => {
            let mut table = Table::new(vec![
                Column::left("NAME"),
                Column::muted("REPO").with_max(40),
                Column::left("CRON"),
                Column::left("TIMEZONE"),
                Column::left("NEXT"),
                Column::left("LAST RUN"),
                Column::status("STATUS"),
            ]);
            for row in job_rows(&jobs, Utc::now()) {
                table.row(row);
            }
            table.render(&mut std::io::stdout().lock())?;
            Ok(())
        }
    }
}

/// One display row per job.
pub(crate) fn job_rows(jobs: &[Job], now: DateTime<Utc>) -> Vec<Vec<String>> {
    jobs.iter()
        .map(|job| {
            vec![
                job.name.clone(),
                job.repo.clone(),
                job.cron.clone(),
                job.timezone.clone(),
                next_run(job, now),
                format_time_ago(job.last_run, now),
                job.last_status
                    .map_or_else(|| "unknown".to_string(), |s| s.to_string()),
            ]
        })
        .collect()
}

fn next_run(job: &Job, now: DateTime<Utc>) -> String {
    let tz = job.resolved_timezone();
    match CronSchedule::parse(&job.cron) {
        Ok(schedule) => schedule
            .next_after(&tz, now)
            .map_or_else(|| "-".to_string(), |at| tz.format_local(at)),
        Err(_) => "invalid cron".to_string(),
    }
}

/// Load the workflow at `path` and upsert it as a scheduled job.
///
/// The job keeps its run history if it was already registered.
pub(crate) fn register(config: &Config, path: &Path) -> Result<Job> {
    let workflow = load_workflow(path)?;
    CronSchedule::parse(&workflow.schedule.cron)?;
    let spec_path = std::path::absolute(path)
        .with_context(|| format!("cannot resolve {}", path.display()))?;

    let job = job_from_workflow(&workflow, spec_path);
    open_store(config)?.upsert(job.clone())?;
    tracing::info!(job = %job.name, spec = %job.spec_path.display(), "job registered");
    Ok(job)
}

pub(crate) fn remove(config: &Config, name: &str) -> Result<()> {
    if !open_store(config)?.remove(name)? {
        bail!("no scheduled job named '{}'", name);
    }
    Ok(())
}

fn job_from_workflow(workflow: &Workflow, spec_path: PathBuf) -> Job {
    let schedule = &workflow.schedule;
    let timezone = schedule
        .timezone
        .as_deref()
        .map(str::trim)
        .filter(|tz| !tz.is_empty())
        .unwrap_or(DEFAULT_TIMEZONE);
    let job = Job::new(
        &workflow.name,
        &workflow.repo,
        schedule.cron.trim(),
        timezone,
        spec_path,
    );
    match &schedule.natural {
        Some(natural) => job.with_natural(natural),
        None => job,
    }
}

fn open_store(config: &Config) -> Result<JsonJobStore> {
    Ok(JsonJobStore::open(&config.jobs_path)?)
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
