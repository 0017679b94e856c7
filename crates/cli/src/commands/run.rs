// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `devagent run` - run a workflow once in the foreground

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use devagent_adapters::FileLockAdapter;
use devagent_core::{RunSummary, SystemClock};
use devagent_daemon::Config;
use devagent_engine::{Execution, JobExecutor, RunOptions};
use devagent_storage::JsonJobStore;
use devagent_workflow::{load_workflow, YamlWorkflowLoader};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::{current_dir, workflow_path};
use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct RunArgs {
    /// Workflow file (default: ./.devagent.yml)
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Kill the run after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Serialize)]
struct RunReport<'a> {
    name: &'a str,
    status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    run_dir: Option<&'a Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a RunSummary>,
}

pub async fn handle(args: RunArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let path = workflow_path(args.file.as_deref(), &current_dir()?);

    let cancel = CancellationToken::new();
    cancel_on_ctrl_c(cancel.clone());

    let mut opts = RunOptions::default().with_cancel(cancel.clone());
    if format == OutputFormat::Text {
        opts = opts.with_echo(std::io::stdout());
    }
    if let Some(secs) = args.timeout {
        opts = opts.with_timeout(Duration::from_secs(secs));
    }

    let result = execute(&path, config, opts).await;
    // Stops the ctrl-c watcher
    cancel.cancel();
    let (name, execution) = result?;

    match format {
        OutputFormat::Text => match &execution {
            Execution::Skipped => println!("job '{}' is already running, skipped", name),
            Execution::Finished(outcome) => {
                println!("run finished with status {}", outcome.status());
                println!("artifacts: {}", outcome.run_dir.display());
            }
        },
        OutputFormat::Json => print_json(&report(&name, &execution))?,
    }
    Ok(())
}

/// Run the workflow at `path` under its job's execution lock.
///
/// The store is updated only when the job is registered under the
/// workflow's name.
pub(crate) async fn execute(
    path: &Path,
    config: &Config,
    opts: RunOptions,
) -> Result<(String, Execution)> {
    // Loaded here only for the job name; the executor reloads under the lock
    let workflow = load_workflow(path)?;
    let store = JsonJobStore::open(&config.jobs_path)?;
    let executor = JobExecutor::new(
        FileLockAdapter::new(&config.locks_dir),
        YamlWorkflowLoader,
        Arc::new(store),
        SystemClock,
    );
    let execution = executor.execute(&workflow.name, path, opts).await?;
    Ok((workflow.name, execution))
}

fn report<'a>(name: &'a str, execution: &'a Execution) -> RunReport<'a> {
    match execution {
        Execution::Skipped => RunReport {
            name,
            status: "skipped",
            run_dir: None,
            summary: None,
        },
        Execution::Finished(outcome) => RunReport {
            name,
            status: outcome.status().as_str(),
            run_dir: Some(&outcome.run_dir),
            summary: Some(&outcome.summary),
        },
    }
}

fn cancel_on_ctrl_c(cancel: CancellationToken) {
    tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                if result.is_ok() {
                    tracing::info!("interrupted, cancelling run");
                    cancel.cancel();
                }
            }
            _ = cancel.cancelled() => {}
        }
    });
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
