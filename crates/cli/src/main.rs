// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! devagent - scheduled shell workflows for local repositories

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod color;
mod commands;
mod env;
mod output;
mod table;

use output::OutputFormat;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use commands::{daemon, init, plan, run, schedule};
use devagent_daemon::Config;

#[derive(Parser)]
#[command(
    name = "devagent",
    version,
    about = "devagent - scheduled shell workflows for local repositories",
    styles = color::styles()
)]
struct Cli {
    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a workflow once, now, in the foreground
    Run(run::RunArgs),
    /// Write a workflow file from a description or flags
    Init(init::InitArgs),
    /// Print the workflow a natural-language description would produce
    Plan(plan::PlanArgs),
    /// Manage scheduled jobs
    Schedule(schedule::ScheduleArgs),
    /// Run the scheduler daemon in the foreground
    Daemon,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", format_error(&e));
        std::process::exit(1);
    }
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, we skip
/// the "Caused by" chain. Otherwise we render the full chain so context
/// isn't lost.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

fn cli_command() -> clap::Command {
    Cli::command()
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.output;

    let Some(command) = cli.command else {
        // No subcommand provided: print help and exit 0
        cli_command().print_help()?;
        println!();
        return Ok(());
    };

    match command {
        // Sets up its own logging before reading configuration
        Commands::Daemon => daemon::handle().await,
        Commands::Run(args) => run::handle(args, &Config::load()?, format).await,
        Commands::Init(args) => init::handle(args, &Config::load()?, format),
        Commands::Plan(args) => plan::handle(args, format),
        Commands::Schedule(args) => schedule::handle(args.command, &Config::load()?, format),
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
