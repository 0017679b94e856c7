// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `devagent plan` - preview the workflow a description would produce

use std::path::Path;

use anyhow::Result;
use clap::Args;
use devagent_workflow::{render_workflow, HeuristicPlanner, PlanRequest, Planner, Workflow};

use super::current_dir;
use super::init::workflow_from_plan;
use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct PlanArgs {
    /// Natural-language description, e.g.
    /// "every weekday at 9am in repo ~/src/app; run make test"
    pub spec: String,

    /// Job name (derived from the description if omitted)
    #[arg(long)]
    pub name: Option<String>,

    /// Cron expression to use instead of one derived from the description
    #[arg(long)]
    pub cron: Option<String>,

    /// Repository path (default: from the description, else current directory)
    #[arg(long)]
    pub repo: Option<String>,

    /// IANA timezone name, "UTC" or "Local" (default: Local)
    #[arg(long)]
    pub timezone: Option<String>,

    /// Shell command to run instead of steps from the description; repeatable
    #[arg(long = "step", value_name = "CMD")]
    pub steps: Vec<String>,
}

pub fn handle(args: PlanArgs, format: OutputFormat) -> Result<()> {
    let workflow = plan_workflow(args, &current_dir()?)?;
    match format {
        OutputFormat::Text => print!("{}", render_workflow(&workflow)?),
        OutputFormat::Json => print_json(&workflow)?,
    }
    Ok(())
}

/// Plan a workflow without writing anything.
pub(crate) fn plan_workflow(args: PlanArgs, cwd: &Path) -> Result<Workflow> {
    let plan = HeuristicPlanner.plan(&PlanRequest {
        spec: args.spec,
        name: args.name,
        cron: args.cron,
        repo: args.repo,
        timezone: args.timezone,
        steps: args.steps,
    })?;
    workflow_from_plan(plan, Vec::new(), cwd)
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
