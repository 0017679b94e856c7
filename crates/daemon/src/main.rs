// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! devagent daemon (devagentd)
//!
//! Background process that keeps cron registrations in sync with the job
//! store and runs jobs when they fire.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use devagent_daemon::logging::{init_file_logging, write_startup_error, write_startup_marker};
use devagent_daemon::{run_until_signal, Config, LifecycleError};
use tracing::{error, info};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Handle info flags before any config/lock acquisition
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("devagentd {VERSION}");
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                println!("devagentd {VERSION}");
                println!("devagent daemon - runs scheduled jobs from the job store");
                println!();
                println!("USAGE:");
                println!("    devagentd");
                println!();
                println!("Jobs are registered with `devagent schedule add`. The daemon");
                println!("re-reads the store every 30s and logs to <state_dir>/daemon.log.");
                println!();
                println!("ENVIRONMENT:");
                println!("    DEVAGENT_STATE_DIR      State directory (default: ~/.devagent)");
                println!("    DEVAGENT_RECONCILE_MS   Reconcile interval override");
                println!("    RUST_LOG                Log filter (default: info)");
                println!();
                println!("OPTIONS:");
                println!("    -h, --help       Print help information");
                println!("    -v, --version    Print version information");
                return Ok(());
            }
            _ => {
                eprintln!("error: unexpected argument '{arg}'");
                eprintln!("Usage: devagentd [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    let config = Config::load()?;

    // Marker goes in before tracing so each startup attempt is easy to find
    write_startup_marker(&config.log_path)?;
    let log_guard = init_file_logging(&config.log_path)?;

    info!("Starting devagent daemon");

    match run_until_signal(&config).await {
        Ok(()) => {
            info!("Daemon stopped");
            Ok(())
        }
        Err(LifecycleError::LockFailed(_)) => {
            let pid = std::fs::read_to_string(&config.lock_path)
                .unwrap_or_default()
                .trim()
                .to_string();
            eprintln!("devagentd is already running");
            if !pid.is_empty() {
                eprintln!("  pid: {pid}");
            }
            drop(log_guard);
            std::process::exit(1);
        }
        Err(e) => {
            // Write error synchronously (tracing is non-blocking and may not flush in time)
            write_startup_error(&config.log_path, &e);
            error!("Failed to start daemon: {}", e);
            drop(log_guard);
            Err(e.into())
        }
    }
}
