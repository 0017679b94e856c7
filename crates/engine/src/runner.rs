// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sequential step runner.
//!
//! Runs a workflow's steps one at a time in the repo directory, streams
//! redacted output to `run.log` (and an optional echo), stops at the first
//! failing step, and writes `summary.json`.

use crate::artifacts::{self, ArtifactError, LOG_FILE};
use crate::redact::{redact, LineRedactor};
use devagent_adapters::subprocess::{exit_code, shell_command, NO_EXIT_CODE};
use devagent_core::{Clock, RunStatus, RunSummary, StepSummary};
use devagent_workflow::{ExpandError, Workflow};
use parking_lot::Mutex;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// How long to keep draining output after a step is killed
const DRAIN_GRACE: Duration = Duration::from_secs(2);

/// Errors that abort a run
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Repo(#[from] ExpandError),

    #[error("repo path {} not accessible: {source}", path.display())]
    RepoUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("repo path {} is not a directory", .0.display())]
    RepoNotDirectory(PathBuf),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error("failed to write run log {}: {source}", path.display())]
    Transcript {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to run step {cmd:?}: {source}")]
    Process {
        cmd: String,
        #[source]
        source: io::Error,
    },
}

/// Per-run knobs
#[derive(Default)]
pub struct RunOptions {
    /// Receives a copy of the transcript as it is written
    pub echo: Option<Box<dyn Write + Send>>,
    /// Cancelling kills the running step and fails the run
    pub cancel: CancellationToken,
    /// Wall-clock limit for the whole run
    pub timeout: Option<Duration>,
}

impl RunOptions {
    pub fn with_echo(mut self, echo: impl Write + Send + 'static) -> Self {
        self.echo = Some(Box::new(echo));
        self
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Finished run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub summary: RunSummary,
    pub run_dir: PathBuf,
}

impl RunOutcome {
    pub fn status(&self) -> RunStatus {
        self.summary.status
    }
}

/// How a step ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepEnd {
    Exited(i32),
    Cancelled,
    TimedOut,
}

impl StepEnd {
    fn exit_code(self) -> i32 {
        match self {
            StepEnd::Exited(code) => code,
            StepEnd::Cancelled | StepEnd::TimedOut => NO_EXIT_CODE,
        }
    }

    fn marker(self) -> Option<&'static str> {
        match self {
            StepEnd::Exited(_) => None,
            StepEnd::Cancelled => Some("! step cancelled"),
            StepEnd::TimedOut => Some("! step timed out"),
        }
    }
}

pub struct Runner<C: Clock> {
    clock: C,
}

impl<C: Clock> Runner<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Run every step of `workflow`.
    ///
    /// The repo must resolve to an existing directory before anything is
    /// written. A non-zero step marks the run failed and skips the rest.
    pub async fn run(&self, workflow: &Workflow, opts: RunOptions) -> Result<RunOutcome, RunError> {
        let repo = workflow.resolve_repo()?;
        let meta = std::fs::metadata(&repo).map_err(|source| RunError::RepoUnavailable {
            path: repo.clone(),
            source,
        })?;
        if !meta.is_dir() {
            return Err(RunError::RepoNotDirectory(repo));
        }

        let RunOptions {
            echo,
            cancel,
            timeout,
        } = opts;
        let deadline = timeout.map(|t| Instant::now() + t);

        let started_at = self.clock.now();
        let run_dir = artifacts::create_run_dir(&repo, started_at)?;
        let log_path = run_dir.join(LOG_FILE);
        let file = File::create(&log_path).map_err(|source| RunError::Transcript {
            path: log_path.clone(),
            source,
        })?;
        let transcript = SharedTranscript::new(log_path.clone(), file, echo);
        let transcript_err = |source| RunError::Transcript {
            path: log_path.clone(),
            source,
        };

        tracing::info!(
            workflow = %workflow.name,
            repo = %repo.display(),
            run_dir = %run_dir.display(),
            "run started"
        );

        let mut summary = RunSummary::begin(&workflow.name, repo.display().to_string(), started_at);
        for step in &workflow.steps {
            let cmd = step.run.trim();
            if cmd.is_empty() {
                continue;
            }
            let shown = redact(cmd).into_owned();
            transcript
                .write_line(&format!("$ {shown}"))
                .map_err(transcript_err)?;

            let begun = std::time::Instant::now();
            let end = run_step(cmd, &shown, &repo, &transcript, &cancel, deadline).await?;
            if let Some(marker) = end.marker() {
                transcript.write_line(marker).map_err(transcript_err)?;
            }
            let step_summary = StepSummary::new(shown, end.exit_code(), begun.elapsed());

            tracing::debug!(
                workflow = %workflow.name,
                cmd = %step_summary.cmd,
                exit_code = step_summary.exit_code,
                duration_sec = step_summary.duration_sec,
                "step finished"
            );
            let failed = !step_summary.succeeded();
            summary.record(step_summary);
            if failed {
                break;
            }
        }

        summary.finish(self.clock.now());
        artifacts::write_summary(&run_dir, &summary)?;
        let copied = artifacts::copy_outputs(&repo, &run_dir, workflow.output_candidates());

        tracing::info!(
            workflow = %workflow.name,
            status = %summary.status,
            steps = summary.steps.len(),
            outputs = copied.len(),
            "run finished"
        );
        Ok(RunOutcome { summary, run_dir })
    }
}

async fn run_step(
    cmd: &str,
    shown: &str,
    repo: &Path,
    transcript: &SharedTranscript,
    cancel: &CancellationToken,
    deadline: Option<Instant>,
) -> Result<StepEnd, RunError> {
    let process_err = |source| RunError::Process {
        cmd: shown.to_string(),
        source,
    };
    let mut child = shell_command(cmd, repo).spawn().map_err(process_err)?;

    let mut pumps = Vec::new();
    if let Some(stdout) = child.stdout.take() {
        pumps.push(spawn_pump(stdout, transcript.clone()));
    }
    if let Some(stderr) = child.stderr.take() {
        pumps.push(spawn_pump(stderr, transcript.clone()));
    }

    let expired = async {
        match deadline {
            Some(at) => tokio::time::sleep_until(at).await,
            None => std::future::pending().await,
        }
    };

    let end = tokio::select! {
        biased;
        _ = cancel.cancelled() => StepEnd::Cancelled,
        _ = expired => StepEnd::TimedOut,
        status = child.wait() => StepEnd::Exited(exit_code(status.map_err(process_err)?)),
    };

    let grace = match end {
        StepEnd::Exited(_) => None,
        StepEnd::Cancelled | StepEnd::TimedOut => {
            if let Err(e) = child.kill().await {
                tracing::warn!(cmd = shown, error = %e, "failed to kill step");
            }
            Some(DRAIN_GRACE)
        }
    };

    for mut pump in pumps {
        let joined = match grace {
            None => (&mut pump).await,
            Some(limit) => match tokio::time::timeout(limit, &mut pump).await {
                Ok(joined) => joined,
                Err(_) => {
                    pump.abort();
                    continue;
                }
            },
        };
        match joined {
            Ok(result) => result.map_err(|source| RunError::Transcript {
                path: transcript.path(),
                source,
            })?,
            Err(e) => tracing::warn!(cmd = shown, error = %e, "output reader failed"),
        }
    }

    Ok(end)
}

/// Copy one output stream through its own redaction stage.
fn spawn_pump<R>(mut reader: R, transcript: SharedTranscript) -> JoinHandle<io::Result<()>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut stage = LineRedactor::new(transcript);
        let mut buf = [0u8; 8192];
        loop {
            let n = match reader.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::debug!(error = %e, "step output closed");
                    break;
                }
            };
            stage.push(&buf[..n])?;
        }
        stage.finish()
    })
}

struct TranscriptInner {
    path: PathBuf,
    file: File,
    echo: Option<Box<dyn Write + Send>>,
}

/// `run.log` plus the optional echo, shared by the output pumps.
///
/// Each `write` lands whole, so lines from stdout and stderr interleave
/// but never split.
#[derive(Clone)]
struct SharedTranscript {
    inner: Arc<Mutex<TranscriptInner>>,
}

impl SharedTranscript {
    fn new(path: PathBuf, file: File, echo: Option<Box<dyn Write + Send>>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(TranscriptInner { path, file, echo })),
        }
    }

    fn path(&self) -> PathBuf {
        self.inner.lock().path.clone()
    }

    fn write_line(&self, line: &str) -> io::Result<()> {
        self.clone().write_all(format!("{line}\n").as_bytes())
    }
}

impl Write for SharedTranscript {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self.inner.lock();
        inner.file.write_all(buf)?;
        if let Some(echo) = inner.echo.as_mut() {
            if let Err(e) = echo.write_all(buf).and_then(|()| echo.flush()) {
                tracing::debug!(error = %e, "echo write failed");
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut inner = self.inner.lock();
        inner.file.flush()?;
        if let Some(echo) = inner.echo.as_mut() {
            let _ = echo.flush();
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
