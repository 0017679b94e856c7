// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `devagent init` - write a workflow file from a description or flags

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use clap::Args;
use devagent_core::{resolve_timezone, CronSchedule, JobTimezone};
use devagent_daemon::Config;
use devagent_workflow::{
    save_workflow, HeuristicPlanner, OutputSpec, Plan, PlanRequest, Planner, Schedule, Step,
    Workflow, DEFAULT_TIMEZONE,
};
use serde::Serialize;

use super::schedule::register;
use super::{current_dir, workflow_path};
use crate::output::{print_json, OutputFormat};

/// Version written into new workflow files
const WORKFLOW_VERSION: u32 = 1;

#[derive(Args)]
pub struct InitArgs {
    /// Natural-language description, e.g.
    /// "every weekday at 9am in repo ~/src/app; run make test"
    pub spec: Option<String>,

    /// Job name, unique across scheduled jobs (derived from the description
    /// if omitted)
    #[arg(long)]
    pub name: Option<String>,

    /// Five-field cron expression, e.g. "0 9 * * 1-5"
    #[arg(long)]
    pub cron: Option<String>,

    /// Repository the steps run in; `~` and `$VAR` are expanded at run time
    /// (default: current directory)
    #[arg(long)]
    pub repo: Option<String>,

    /// IANA timezone name, "UTC" or "Local" (default: Local)
    #[arg(long)]
    pub timezone: Option<String>,

    /// Human description of the schedule, kept for reference
    #[arg(long, conflicts_with = "spec")]
    pub natural: Option<String>,

    /// Shell command to run; repeat for multiple steps, run in order
    #[arg(long = "step", value_name = "CMD")]
    pub steps: Vec<String>,

    /// Repo-relative file copied into the run directory if present; repeatable
    #[arg(long = "copy", value_name = "PATH")]
    pub copy: Vec<String>,

    /// Workflow file to write (default: ./.devagent.yml)
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Also add the job to the schedule
    #[arg(long)]
    pub register: bool,

    /// Overwrite an existing workflow file
    #[arg(long)]
    pub force: bool,
}

#[derive(Serialize)]
struct InitReport<'a> {
    name: &'a str,
    path: &'a Path,
    registered: bool,
}

pub fn handle(args: InitArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let registered = args.register;
    let (workflow, path) = init(args, &current_dir()?, config)?;

    match format {
        OutputFormat::Text if registered => {
            println!("workflow saved to {} and scheduled", path.display())
        }
        OutputFormat::Text => println!("workflow saved to {}", path.display()),
        OutputFormat::Json => print_json(&InitReport {
            name: &workflow.name,
            path: &path,
            registered,
        })?,
    }
    Ok(())
}

/// Write the workflow described by `args`, registering it if asked.
pub(crate) fn init(args: InitArgs, cwd: &Path, config: &Config) -> Result<(Workflow, PathBuf)> {
    let path = workflow_path(args.file.as_deref(), cwd);
    if path.exists() && !args.force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let register_job = args.register;
    let workflow = build_workflow(args, cwd)?;

    save_workflow(&path, &workflow)?;
    if register_job {
        register(config, &path)?;
    }
    Ok((workflow, path))
}

/// Plan from the description when one is given, else take the flags as is.
fn build_workflow(args: InitArgs, cwd: &Path) -> Result<Workflow> {
    let plan = match args.spec {
        Some(spec) => HeuristicPlanner.plan(&PlanRequest {
            spec,
            name: args.name,
            cron: args.cron,
            repo: args.repo,
            timezone: args.timezone,
            steps: args.steps,
        })?,
        None => Plan {
            name: args
                .name
                .ok_or_else(|| anyhow!("--name is required without a description"))?,
            cron: args
                .cron
                .ok_or_else(|| anyhow!("--cron is required without a description"))?,
            repo: args.repo,
            natural: args.natural.unwrap_or_default(),
            timezone: args.timezone.unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
            steps: args.steps,
        },
    };
    workflow_from_plan(plan, args.copy, cwd)
}

/// Validate a plan and assemble the workflow.
pub(crate) fn workflow_from_plan(plan: Plan, copy: Vec<String>, cwd: &Path) -> Result<Workflow> {
    let schedule = CronSchedule::parse(&plan.cron)?;
    check_timezone(&plan.timezone)?;

    let steps: Vec<Step> = plan
        .steps
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(Step::new)
        .collect();
    if steps.is_empty() {
        tracing::warn!(name = %plan.name, "workflow has no steps");
    }

    Ok(Workflow {
        version: WORKFLOW_VERSION,
        name: plan.name,
        repo: plan.repo.unwrap_or_else(|| cwd.display().to_string()),
        schedule: Schedule {
            natural: (!plan.natural.is_empty()).then_some(plan.natural),
            cron: schedule.expr().to_string(),
            timezone: Some(plan.timezone),
        },
        steps,
        outputs: (!copy.is_empty()).then_some(OutputSpec {
            copy_if_exists: copy,
        }),
    })
}

/// Unknown zone names would silently run in local time, so reject them here.
fn check_timezone(name: &str) -> Result<()> {
    let trimmed = name.trim();
    let means_local = trimmed.is_empty() || trimmed.eq_ignore_ascii_case("local");
    if resolve_timezone(trimmed) == JobTimezone::Local && !means_local {
        bail!("unknown timezone '{}'", trimmed);
    }
    Ok(())
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
