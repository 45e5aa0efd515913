// SPDX-License-Identifier: MIT

//! Clock abstraction for testable time handling.
//!
//! Every component that stamps a file with a timestamp (locks, journals,
//! secrets, the atomic writer's temp-file suffix) goes through a [`Clock`]
//! rather than calling `SystemTime::now()` directly, so recovery and
//! staleness logic can be driven deterministically under [`FakeClock`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

/// A clock that provides the current time.
///
/// `monotonic_ms` is distinct from `epoch_ms`: it is used for the atomic
/// writer's temp-file suffix, where only strictly-increasing-per-process
/// behavior matters, not wall-clock accuracy.
pub trait Clock: Clone + Send + Sync {
    fn now(&self) -> Instant;
    fn epoch_ms(&self) -> u64;
    fn monotonic_ms(&self) -> u64;

    /// Current time formatted as ISO 8601 / RFC 3339 (e.g. for `updated_at`).
    fn iso8601(&self) -> String {
        let millis = self.epoch_ms();
        let dt: DateTime<Utc> = DateTime::from_timestamp_millis(millis as i64)
            .unwrap_or_else(|| DateTime::from_timestamp(0, 0).unwrap_or(DateTime::<Utc>::MIN_UTC));
        dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    }
}

/// Real system clock.
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn epoch_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    fn monotonic_ms(&self) -> u64 {
        self.epoch_ms()
    }
}

/// Fake clock for testing with controllable, monotonically-advancing time.
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<Instant>>,
    epoch_ms: Arc<Mutex<u64>>,
    monotonic_ms: Arc<AtomicU64>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(Instant::now())),
            epoch_ms: Arc::new(Mutex::new(1_700_000_000_000)),
            monotonic_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Advance the clock by the given duration.
    pub fn advance(&self, duration: std::time::Duration) {
        *self.current.lock() += duration;
        *self.epoch_ms.lock() += duration.as_millis() as u64;
        self.monotonic_ms.fetch_add(duration.as_millis() as u64, Ordering::SeqCst);
    }

    /// Set the epoch milliseconds value directly.
    pub fn set_epoch_ms(&self, ms: u64) {
        *self.epoch_ms.lock() = ms;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        *self.current.lock()
    }

    fn epoch_ms(&self) -> u64 {
        *self.epoch_ms.lock()
    }

    fn monotonic_ms(&self) -> u64 {
        // Ticks forward by 1ms on every read so repeated calls within the
        // same `advance` window still produce unique temp-file suffixes.
        self.monotonic_ms.fetch_add(1, Ordering::SeqCst)
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
