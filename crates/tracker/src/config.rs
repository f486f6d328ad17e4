// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracker configuration.

use et_core::TrackerError;
use std::time::Duration;

const DEFAULT_RECLAIM_IDLE_AFTER: Duration = Duration::from_secs(10 * 60);
const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);
const DEFAULT_CLEANUP_TASK_NAME: &str = "CleanupTrackedErrors";

/// Configuration for an [`crate::ErrorTracker`].
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Number of failures (or one `final` registration) before
    /// `has_failed_too_many_times` returns true. Must be at least 1.
    pub max_delivery_attempts: u32,
    /// How long an entry may sit without a new failure before the
    /// cleanup task reclaims it.
    pub reclaim_idle_after: Duration,
    /// How often the cleanup task sweeps the registry.
    pub cleanup_interval: Duration,
    /// Name passed to the periodic-task factory for the cleanup task.
    pub cleanup_task_name: String,
}

impl TrackerConfig {
    /// A config with the given attempt threshold and every other field at
    /// its default.
    pub fn new(max_delivery_attempts: u32) -> Self {
        Self {
            max_delivery_attempts,
            reclaim_idle_after: DEFAULT_RECLAIM_IDLE_AFTER,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
            cleanup_task_name: DEFAULT_CLEANUP_TASK_NAME.to_string(),
        }
    }

    pub fn with_reclaim_idle_after(mut self, duration: Duration) -> Self {
        self.reclaim_idle_after = duration;
        self
    }

    pub fn with_cleanup_interval(mut self, duration: Duration) -> Self {
        self.cleanup_interval = duration;
        self
    }

    pub fn with_cleanup_task_name(mut self, name: impl Into<String>) -> Self {
        self.cleanup_task_name = name.into();
        self
    }

    /// Fails with `InvalidArgument` if `max_delivery_attempts < 1`.
    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.max_delivery_attempts < 1 {
            return Err(TrackerError::InvalidArgument(
                "max_delivery_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
