// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-message aggregate of caught failures.

use crate::clock::Clock;
use crate::failure::{CaughtFailure, Exception};
use std::time::{Duration, Instant};

/// Ordered, append-only list of failures for one message id, plus a
/// sticky "do not retry again" flag.
///
/// `TrackingEntry` is logically immutable: [`TrackingEntry::extend`]
/// returns a new value (or `self`, unchanged, once `final` is true) rather
/// than mutating in place. The registry is responsible for swapping the
/// replacement in atomically — this type has no opinion on concurrency.
#[derive(Debug, Clone)]
pub struct TrackingEntry {
    failures: Vec<CaughtFailure>,
    is_final: bool,
}

impl TrackingEntry {
    /// A fresh entry holding a single failure.
    pub fn new(exception: Exception, clock: &dyn Clock, is_final: bool) -> Self {
        Self {
            failures: vec![CaughtFailure::new(exception, clock)],
            is_final,
        }
    }

    /// Append a failure, honoring the sticky-final rule: once `is_final`
    /// is true, every subsequent call is a no-op that returns an
    /// unchanged clone of `self`.
    pub fn extend(&self, exception: Exception, clock: &dyn Clock, is_final: bool) -> Self {
        if self.is_final {
            return self.clone();
        }

        let mut failures = self.failures.clone();
        failures.push(CaughtFailure::new(exception, clock));
        Self {
            failures,
            is_final: self.is_final || is_final,
        }
    }

    /// Number of failures recorded so far.
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Whether this entry has been marked final (do not retry again).
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// Failures in chronological (insertion) order.
    pub fn failures(&self) -> &[CaughtFailure] {
        &self.failures
    }

    /// `now - max(failures[*].time)`, clamped to zero by the clock.
    pub fn elapsed_since_last_failure(&self, clock: &dyn Clock) -> Duration {
        let last = self
            .failures
            .iter()
            .map(CaughtFailure::time)
            .max()
            .unwrap_or_else(|| clock.now());
        clock.elapsed_since(last)
    }

    /// The timestamp of the most recent failure, if any.
    pub fn last_failure_time(&self) -> Option<Instant> {
        self.failures.iter().map(CaughtFailure::time).max()
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
