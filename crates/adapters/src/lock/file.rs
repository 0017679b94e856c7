// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Advisory file locks under a locks directory

use super::{lock_file_name, InstanceLock, LockError};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Locks `<dir>/<sanitized-name>.lock` with an exclusive flock.
///
/// The lock is process-wide and released by the OS if the holder dies,
/// so daemon-triggered and manual runs exclude each other.
#[derive(Debug, Clone)]
pub struct FileLockAdapter {
    dir: PathBuf,
}

impl FileLockAdapter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn lock_path(&self, job_name: &str) -> PathBuf {
        self.dir.join(lock_file_name(job_name))
    }
}

impl InstanceLock for FileLockAdapter {
    type Guard = FileLockGuard;

    fn try_acquire(&self, job_name: &str) -> Result<FileLockGuard, LockError> {
        let path = self.lock_path(job_name);

        std::fs::create_dir_all(&self.dir).map_err(|source| LockError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let opened = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .and_then(|file| file.try_lock_exclusive().map(|()| file));

        match opened {
            Ok(file) => Ok(FileLockGuard {
                file: Some(file),
                path,
            }),
            Err(e) if is_contended(&e) => Err(LockError::AlreadyRunning(job_name.to_string())),
            Err(source) => Err(LockError::Io { path, source }),
        }
    }
}

fn is_contended(err: &std::io::Error) -> bool {
    err.kind() == std::io::ErrorKind::WouldBlock
        || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}

/// Held execution lock. Dropping it unlocks.
#[derive(Debug)]
pub struct FileLockGuard {
    file: Option<File>,
    path: PathBuf,
}

impl FileLockGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Unlock and close now instead of at drop.
    pub fn release(mut self) {
        self.unlock();
    }

    fn unlock(&mut self) {
        if let Some(file) = self.file.take() {
            if let Err(e) = FileExt::unlock(&file) {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to unlock");
            }
        }
    }
}

impl Drop for FileLockGuard {
    fn drop(&mut self) {
        self.unlock();
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
