// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{Duration, TimeZone, Utc};

use super::format_time_ago;

#[yare::parameterized(
    seconds = { 42, "42s ago" },
    minutes = { 5 * 60 + 10, "5m ago" },
    hours = { 3600 + 30 * 60, "1h30m ago" },
    days = { 3 * 86400, "3d ago" },
)]
fn time_ago(secs: i64, expected: &str) {
    let now = Utc.with_ymd_and_hms(2026, 1, 30, 8, 14, 9).unwrap();
    let at = now - Duration::seconds(secs);
    assert_eq!(format_time_ago(Some(at), now), expected);
}

#[test]
fn never_run() {
    assert_eq!(format_time_ago(None, Utc::now()), "never");
}

#[test]
fn future_instant_clamps_to_zero() {
    let now = Utc.with_ymd_and_hms(2026, 1, 30, 8, 0, 0).unwrap();
    let later = now + Duration::minutes(5);
    assert_eq!(format_time_ago(Some(later), now), "0s ago");
}
