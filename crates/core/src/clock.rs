// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wall-clock abstraction so run timestamps can be pinned in tests.

use chrono::{DateTime, Utc};

/// Source of the current UTC instant.
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Real system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::Clock;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Manually advanced clock for tests. Clones share the same instant.
    #[derive(Debug, Clone)]
    pub struct FakeClock {
        now: Arc<Mutex<DateTime<Utc>>>,
    }

    impl Default for FakeClock {
        fn default() -> Self {
            Self::at(Utc.with_ymd_and_hms(2026, 1, 30, 8, 14, 9).single().unwrap_or_default())
        }
    }

    impl FakeClock {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn at(now: DateTime<Utc>) -> Self {
            Self {
                now: Arc::new(Mutex::new(now)),
            }
        }

        pub fn advance(&self, by: Duration) {
            let mut now = self.now.lock();
            *now += by;
        }

        pub fn set(&self, to: DateTime<Utc>) {
            *self.now.lock() = to;
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock()
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeClock;

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
