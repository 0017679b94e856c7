//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for running the devagent binary against an
//! isolated repository and state directory.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};

// Spec polling timeouts
pub const SPEC_POLL_INTERVAL_MS: u64 = 10;
pub const SPEC_WAIT_MAX_MS: u64 = 5000;

/// Returns a Command configured to run the devagent binary
pub fn devagent_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_devagent"))
}

/// High-level CLI builder for fluent test assertions
pub struct CliBuilder {
    args: Vec<String>,
    dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
}

impl CliBuilder {
    fn new() -> Self {
        Self {
            args: Vec::new(),
            dir: None,
            envs: vec![("NO_COLOR".into(), "1".into())],
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set working directory
    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((
            key.to_string(),
            value.as_ref().to_string_lossy().to_string(),
        ));
        self
    }

    /// Build the command without running it
    pub fn command(self) -> Command {
        let mut cmd = devagent_cmd();
        cmd.args(&self.args);

        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }

        // A parent override would make the daemon poll at a different rate
        cmd.env_remove("DEVAGENT_RECONCILE_MS");

        for (key, value) in self.envs {
            cmd.env(key, value);
        }

        cmd
    }

    /// Start the command in the background with piped output.
    pub fn spawn(self) -> Child {
        let mut cmd = self.command();
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        cmd.spawn().expect("command should start")
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("command should run");
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect failure (non-zero exit code)
    pub fn fails(self) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("command should run");
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert stdout equals expected exactly.
    /// **Prefer this for format specs** - catches format regressions.
    pub fn stdout_eq(self, expected: &str) -> Self {
        assert_eq!(self.stdout(), expected);
        self
    }

    /// Assert stdout contains substring.
    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    /// Assert stdout does not contain substring.
    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            !stdout.contains(unexpected),
            "stdout should not contain '{}'\nstdout: {}",
            unexpected,
            stdout
        );
        self
    }

    /// Assert stderr contains substring.
    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout()).expect("stdout should be JSON")
    }
}

// =============================================================================
// Polling
// =============================================================================

/// Poll a condition until it returns true or timeout is reached.
pub fn wait_for<F>(timeout_ms: u64, mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    let start = std::time::Instant::now();
    let timeout = std::time::Duration::from_millis(timeout_ms);
    let poll_interval = std::time::Duration::from_millis(SPEC_POLL_INTERVAL_MS);

    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        std::thread::sleep(poll_interval);
    }
    false
}

// =============================================================================
// Project
// =============================================================================

/// Temporary repository with its own devagent state directory.
pub struct Project {
    dir: tempfile::TempDir,
    state_dir: tempfile::TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            state_dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Get the repository path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file at the given path (parent directories created automatically)
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.dir.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }

    pub fn read(&self, path: impl AsRef<Path>) -> String {
        std::fs::read_to_string(self.path().join(path)).unwrap()
    }

    pub fn state_path(&self) -> &Path {
        self.state_dir.path()
    }

    /// Run devagent in this project's context
    pub fn devagent(&self) -> CliBuilder {
        cli()
            .pwd(self.path())
            .env("DEVAGENT_STATE_DIR", self.state_path())
    }

    /// `devagent init` with a fixed name and schedule plus the given steps
    pub fn init(&self, name: &str, steps: &[&str]) -> RunAssert {
        let mut args = vec!["init", "--name", name, "--cron", "0 7 * * *", "--timezone", "UTC"];
        for step in steps {
            args.extend(["--step", *step]);
        }
        self.devagent().args(&args).passes()
    }

    /// Run directories created so far, oldest first
    pub fn run_dirs(&self) -> Vec<PathBuf> {
        let Ok(entries) = std::fs::read_dir(self.path().join("devagent_runs")) else {
            return Vec::new();
        };
        let mut dirs: Vec<PathBuf> = entries.map(|e| e.unwrap().path()).collect();
        dirs.sort();
        dirs
    }

    /// PID written by a running daemon, if any
    pub fn daemon_pid(&self) -> Option<u32> {
        std::fs::read_to_string(self.state_path().join("daemon.pid"))
            .ok()
            .and_then(|s| s.trim().parse().ok())
    }
}

/// Create a CLI builder for devagent commands
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}
