// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.
//!
//! State paths are resolved by `devagent_daemon::env` so the CLI and the
//! daemon always agree on where jobs and locks live.

// --- Color ---

pub fn no_color() -> bool {
    std::env::var("NO_COLOR").is_ok_and(|v| v == "1")
}

pub fn force_color() -> bool {
    std::env::var("COLOR").is_ok_and(|v| v == "1")
}
