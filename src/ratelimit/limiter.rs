//! Core admission limiter implementation.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::RateLimitingConfig;

use super::clock::{Clock, SystemClock};
use super::counter::{CounterEntry, TimeWindow};
use super::key::CounterKey;

/// Identifier substituted when the caller supplies none.
///
/// All unidentified callers share this single quota.
pub const DEFAULT_IDENTIFIER: &str = "default";

/// The outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdmissionResult {
    /// Whether the request may proceed
    pub allowed: bool,
    /// Quota left in the current minute window after this check
    pub minute_remaining: u64,
    /// Quota left in the current hour window after this check
    pub hour_remaining: u64,
    /// Upper-bound timestamp (ms since epoch) by which at least one window
    /// refreshes. The minute counter usually recovers sooner; treat this as
    /// a hint, not a precise retry-after value.
    pub reset_time: u64,
}

/// Counters for both time horizons, keyed per (client, window).
#[derive(Debug, Default)]
struct WindowStore {
    minute: HashMap<CounterKey, CounterEntry>,
    hour: HashMap<CounterKey, CounterEntry>,
}

/// The admission limiter that gates requests against two fixed windows.
///
/// Each client is tracked against an independent per-minute and per-hour
/// counter; both must have quota for a request to be admitted. The limiter
/// is thread-safe and can be shared across tasks behind an `Arc`; every
/// check is atomic with respect to its read-modify-write of the store.
pub struct AdmissionLimiter<C: Clock = SystemClock> {
    /// Counter store, guarded as a whole; checks are brief enough that a
    /// single coarse lock suffices
    store: Mutex<WindowStore>,
    /// Max admitted requests per client per minute window
    minute_limit: u64,
    /// Max admitted requests per client per hour window
    hour_limit: u64,
    /// Time source for window computation
    clock: C,
}

impl AdmissionLimiter<SystemClock> {
    /// Create a limiter on the system clock.
    pub fn new(config: RateLimitingConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> AdmissionLimiter<C> {
    /// Create a limiter with an explicit time source.
    pub fn with_clock(config: RateLimitingConfig, clock: C) -> Self {
        Self {
            store: Mutex::new(WindowStore::default()),
            minute_limit: config.minute_limit,
            hour_limit: config.hour_limit,
            clock,
        }
    }

    /// Decide admission for the given client and record the attempt.
    ///
    /// This never fails: any identifier (including the empty string) and any
    /// clock value produce a result. A denied request is reported, never
    /// counted against either window.
    pub fn check_limit(&self, identifier: Option<&str>) -> AdmissionResult {
        let identifier = identifier.unwrap_or(DEFAULT_IDENTIFIER);
        let now = self.clock.now_ms();

        trace!(identifier = identifier, now = now, "Checking admission");

        let minute_key = CounterKey::new(identifier, TimeWindow::Minute.index(now));
        let hour_key = CounterKey::new(identifier, TimeWindow::Hour.index(now));

        let (allowed, minute_remaining, hour_remaining) = {
            let mut store = self.store.lock();

            Self::prune(&mut store, now);

            let minute_entry = store
                .minute
                .get(&minute_key)
                .copied()
                .unwrap_or_else(|| CounterEntry::new(now));
            let hour_entry = store
                .hour
                .get(&hour_key)
                .copied()
                .unwrap_or_else(|| CounterEntry::new(now));

            let minute_remaining = self.minute_limit.saturating_sub(minute_entry.count);
            let hour_remaining = self.hour_limit.saturating_sub(hour_entry.count);

            let allowed =
                minute_entry.count < self.minute_limit && hour_entry.count < self.hour_limit;

            if allowed {
                if minute_entry.count == 0 {
                    debug!(key = %minute_key, "Creating new minute counter");
                }
                if hour_entry.count == 0 {
                    debug!(key = %hour_key, "Creating new hour counter");
                }
                store.minute.insert(
                    minute_key,
                    CounterEntry {
                        count: minute_entry.count + 1,
                        window_start: minute_entry.window_start,
                    },
                );
                store.hour.insert(
                    hour_key,
                    CounterEntry {
                        count: hour_entry.count + 1,
                        window_start: hour_entry.window_start,
                    },
                );
            } else {
                debug!(
                    identifier = identifier,
                    minute_remaining = minute_remaining,
                    hour_remaining = hour_remaining,
                    "Admission denied"
                );
            }

            (allowed, minute_remaining, hour_remaining)
        };

        // Remaining figures reflect the just-consumed unit when admitted
        AdmissionResult {
            allowed,
            minute_remaining: if allowed {
                minute_remaining.saturating_sub(1)
            } else {
                minute_remaining
            },
            hour_remaining: if allowed {
                hour_remaining.saturating_sub(1)
            } else {
                hour_remaining
            },
            reset_time: TimeWindow::Minute
                .next_boundary(now)
                .max(TimeWindow::Hour.next_boundary(now)),
        }
    }

    /// Drop entries whose window has fully elapsed relative to `now_ms`.
    fn prune(store: &mut WindowStore, now_ms: u64) {
        store
            .minute
            .retain(|_, entry| !entry.is_stale(TimeWindow::Minute, now_ms));
        store
            .hour
            .retain(|_, entry| !entry.is_stale(TimeWindow::Hour, now_ms));
    }

    /// Get the configured per-minute limit.
    pub fn minute_limit(&self) -> u64 {
        self.minute_limit
    }

    /// Get the configured per-hour limit.
    pub fn hour_limit(&self) -> u64 {
        self.hour_limit
    }

    /// Get the number of live counter entries across both windows.
    pub fn counter_count(&self) -> usize {
        let store = self.store.lock();
        store.minute.len() + store.hour.len()
    }

    /// Clear all counters.
    ///
    /// This is primarily useful for testing.
    pub fn clear(&self) {
        let mut store = self.store.lock();
        store.minute.clear();
        store.hour.clear();
    }
}
