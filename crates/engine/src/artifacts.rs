// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run artifacts under `<repo>/devagent_runs/<stamp>/`.

use chrono::{DateTime, Utc};
use devagent_core::{run_stamp, RunSummary};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory under the repo holding one subdirectory per run
pub const RUNS_DIR: &str = "devagent_runs";

/// Redacted transcript of a run
pub const LOG_FILE: &str = "run.log";

pub const SUMMARY_FILE: &str = "summary.json";

/// Highest `-N` suffix tried when run directories collide
const MAX_COLLISION_SUFFIX: u32 = 1000;

/// Errors writing or reading run artifacts
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to create run directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid run summary: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn runs_root(repo: &Path) -> PathBuf {
    repo.join(RUNS_DIR)
}

/// Create a fresh run directory named after `started_at`.
///
/// Runs starting in the same second get `-2`, `-3`, ... suffixes rather
/// than sharing a directory.
pub fn create_run_dir(repo: &Path, started_at: DateTime<Utc>) -> Result<PathBuf, ArtifactError> {
    let root = runs_root(repo);
    fs::create_dir_all(&root).map_err(|source| ArtifactError::CreateDir {
        path: root.clone(),
        source,
    })?;

    let stamp = run_stamp(started_at);
    let mut candidate = root.join(&stamp);
    let mut suffix = 1;
    loop {
        match fs::create_dir(&candidate) {
            Ok(()) => return Ok(candidate),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && suffix < MAX_COLLISION_SUFFIX => {
                suffix += 1;
                candidate = root.join(format!("{stamp}-{suffix}"));
            }
            Err(source) => {
                return Err(ArtifactError::CreateDir {
                    path: candidate,
                    source,
                })
            }
        }
    }
}

/// Write `summary.json` into `run_dir` via a temp file and rename.
pub fn write_summary(run_dir: &Path, summary: &RunSummary) -> Result<PathBuf, ArtifactError> {
    let path = run_dir.join(SUMMARY_FILE);
    let tmp_path = run_dir.join(format!("{SUMMARY_FILE}.tmp"));
    let io_err = |source| ArtifactError::Write {
        path: tmp_path.clone(),
        source,
    };

    {
        let out = File::create(&tmp_path).map_err(io_err)?;
        let mut writer = BufWriter::new(out);
        serde_json::to_writer_pretty(&mut writer, summary)?;
        writer.write_all(b"\n").map_err(io_err)?;
        let out = writer.into_inner().map_err(|e| io_err(e.into_error()))?;
        out.sync_all().map_err(io_err)?;
    }

    fs::rename(&tmp_path, &path).map_err(|source| ArtifactError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Read a summary written by [`write_summary`].
pub fn read_summary(path: &Path) -> Result<RunSummary, ArtifactError> {
    let content = fs::read(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_slice(&content)?)
}

/// Copy each existing repo-relative file into `run_dir` under its base name.
///
/// Missing paths and copy failures are skipped. Returns the copies made.
pub fn copy_outputs<'a>(
    repo: &Path,
    run_dir: &Path,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Vec<PathBuf> {
    let mut copied = Vec::new();
    for candidate in candidates {
        let src = repo.join(candidate);
        if !src.is_file() {
            tracing::debug!(output = candidate, "output not present, skipping");
            continue;
        }
        let Some(base) = src.file_name() else {
            continue;
        };
        let dest = run_dir.join(base);
        match fs::copy(&src, &dest) {
            Ok(_) => copied.push(dest),
            Err(e) => tracing::debug!(
                output = candidate,
                dest = %dest.display(),
                error = %e,
                "failed to copy output"
            ),
        }
    }
    copied
}

#[cfg(test)]
#[path = "artifacts_tests.rs"]
mod tests;
