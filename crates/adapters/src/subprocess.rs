// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess helpers for job steps

use std::ffi::OsStr;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

/// Substrings that mark an environment variable as secret (matched upper-cased).
pub const SECRET_MARKERS: [&str; 3] = ["SECRET", "TOKEN", "KEY"];

/// Exit code recorded for a step with no code, such as one killed by a signal.
pub const NO_EXIT_CODE: i32 = -1;

/// Whether a variable is withheld from step subprocesses.
pub fn is_secret_var(name: &str) -> bool {
    let upper = name.to_uppercase();
    SECRET_MARKERS.iter().any(|marker| upper.contains(marker))
}

/// Copy of `vars` with secret variables removed.
///
/// Names and values need not be UTF-8; names are matched lossily.
pub fn scrubbed_env<I, K, V>(vars: I) -> Vec<(K, V)>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<OsStr>,
{
    vars.into_iter()
        .filter(|(name, _)| !is_secret_var(&name.as_ref().to_string_lossy()))
        .collect()
}

/// `bash -c <script>` in `cwd` with a scrubbed copy of this process's
/// environment, no stdin, piped stdout/stderr.
///
/// The child is killed if its handle is dropped.
pub fn shell_command(script: &str, cwd: &Path) -> Command {
    let mut cmd = Command::new("bash");
    cmd.arg("-c")
        .arg(script)
        .current_dir(cwd)
        .env_clear()
        .envs(scrubbed_env(std::env::vars_os()))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    cmd
}

/// Exit code of a finished step, or [`NO_EXIT_CODE`] when the process
/// was terminated by a signal.
pub fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(NO_EXIT_CODE)
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
