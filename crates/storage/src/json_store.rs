// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON-file job store shared by the daemon and the CLI.
//!
//! Jobs live in a single `jobs.json` keyed by name. Readers load the file
//! as-is; writers take an exclusive advisory lock on a sibling `.lock` file,
//! re-read, mutate, and replace the file atomically (write `.tmp`, rename).

use crate::{JobRepository, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use devagent_core::{Job, RunStatus};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct JobsFile {
    #[serde(default)]
    jobs: BTreeMap<String, Job>,
}

/// File-backed [`JobRepository`].
#[derive(Debug, Clone)]
pub struct JsonJobStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl JsonJobStore {
    /// Open (without creating) the store at `path`, creating its directory.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let lock_path = path.with_extension("json.lock");
        Ok(Self { path, lock_path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All jobs ordered by name.
    pub fn list(&self) -> Result<Vec<Job>, StoreError> {
        Ok(self.read()?.jobs.into_values().collect())
    }

    pub fn get(&self, name: &str) -> Result<Option<Job>, StoreError> {
        Ok(self.read()?.jobs.remove(name))
    }

    /// Insert or replace a job definition.
    ///
    /// Run history (`last_status`, `last_run`) of an existing job is kept.
    pub fn upsert(&self, mut job: Job) -> Result<(), StoreError> {
        self.mutate(|file| {
            if let Some(existing) = file.jobs.get(&job.name) {
                job.last_status = existing.last_status;
                job.last_run = existing.last_run;
            }
            job.updated_at = Some(Utc::now());
            file.jobs.insert(job.name.clone(), job);
        })
    }

    /// Remove a job. Returns whether it existed.
    pub fn remove(&self, name: &str) -> Result<bool, StoreError> {
        self.mutate(|file| file.jobs.remove(name).is_some())
    }

    /// Record a run outcome. Returns whether the job existed.
    pub fn record_run(
        &self,
        name: &str,
        status: RunStatus,
        at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        self.mutate(|file| match file.jobs.get_mut(name) {
            Some(job) => {
                job.record_run(status, at);
                true
            }
            None => false,
        })
    }

    fn read(&self) -> Result<JobsFile, StoreError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(JobsFile::default()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_reader(BufReader::new(file)).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn mutate<T>(&self, apply: impl FnOnce(&mut JobsFile) -> T) -> Result<T, StoreError> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| StoreError::Io { path, source }
        };

        let lock = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.lock_path)
            .map_err(io_err(&self.lock_path))?;
        lock.lock_exclusive().map_err(io_err(&self.lock_path))?;

        let mut file = self.read()?;
        let out = apply(&mut file);
        self.save(&file)?;

        if let Err(e) = lock.unlock() {
            tracing::warn!(path = %self.lock_path.display(), error = %e, "failed to unlock job store");
        }
        Ok(out)
    }

    fn save(&self, file: &JobsFile) -> Result<(), StoreError> {
        let tmp_path = self.path.with_extension("json.tmp");
        let io_err = |source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        };

        {
            let out = File::create(&tmp_path).map_err(io_err)?;
            let mut writer = BufWriter::new(out);
            serde_json::to_writer_pretty(&mut writer, file)?;
            writer.write_all(b"\n").map_err(io_err)?;
            let out = writer.into_inner().map_err(|e| io_err(e.into_error()))?;
            out.sync_all().map_err(io_err)?;
        }

        fs::rename(&tmp_path, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

#[async_trait]
impl JobRepository for JsonJobStore {
    async fn list_scheduled(&self) -> Result<Vec<Job>, StoreError> {
        self.list()
    }

    async fn update_run_result(
        &self,
        name: &str,
        status: RunStatus,
        at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        if !self.record_run(name, status, at)? {
            tracing::debug!(job = name, "run result for unknown job ignored");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "json_store_tests.rs"]
mod tests;
