// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

#[test]
fn acquire_creates_lock_file_in_dir() {
    let dir = tempdir().unwrap();
    let locks = FileLockAdapter::new(dir.path().join("locks"));

    let guard = locks.try_acquire("Daily Report").unwrap();

    assert_eq!(guard.path(), dir.path().join("locks").join("daily-report.lock"));
    assert!(guard.path().exists());
}

#[test]
fn second_acquire_of_same_name_is_already_running() {
    let dir = tempdir().unwrap();
    let locks = FileLockAdapter::new(dir.path());

    let _held = locks.try_acquire("nightly").unwrap();
    let err = locks.try_acquire("nightly").unwrap_err();

    assert!(matches!(err, LockError::AlreadyRunning(ref name) if name == "nightly"), "got {err:?}");
}

#[test]
fn distinct_names_never_contend() {
    let dir = tempdir().unwrap();
    let locks = FileLockAdapter::new(dir.path());

    let a = locks.try_acquire("alpha").unwrap();
    let b = locks.try_acquire("beta").unwrap();

    assert_ne!(a.path(), b.path());
}

#[test]
fn separate_adapters_on_same_dir_exclude_each_other() {
    let dir = tempdir().unwrap();
    let daemon = FileLockAdapter::new(dir.path());
    let manual = FileLockAdapter::new(dir.path());

    let _held = daemon.try_acquire("nightly").unwrap();
    assert!(matches!(
        manual.try_acquire("nightly"),
        Err(LockError::AlreadyRunning(_))
    ));
}

#[test]
fn release_allows_reacquire() {
    let dir = tempdir().unwrap();
    let locks = FileLockAdapter::new(dir.path());

    locks.try_acquire("nightly").unwrap().release();
    let again = locks.try_acquire("nightly");

    assert!(again.is_ok());
}

#[test]
fn drop_releases_lock() {
    let dir = tempdir().unwrap();
    let locks = FileLockAdapter::new(dir.path());

    {
        let _guard = locks.try_acquire("nightly").unwrap();
    }

    assert!(locks.try_acquire("nightly").is_ok());
}

#[test]
fn unwritable_dir_is_io_error() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();
    let locks = FileLockAdapter::new(&blocker);

    let err = locks.try_acquire("nightly").unwrap_err();

    assert!(matches!(err, LockError::Io { .. }), "got {err:?}");
}
