// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! et-tracker: the concurrent delivery-attempt error tracker.
//!
//! [`ErrorTracker`] is consulted once per delivery attempt
//! (`has_failed_too_many_times`) and updated whenever a handler fails
//! (`register_error`). A background [`cleanup`] task periodically evicts
//! entries idle beyond the reclaim threshold so the registry's memory
//! stays bounded even for messages that never reach `clean_up` (e.g.
//! because a worker crashed between failing and dead-lettering).

mod cleanup;
pub mod config;
pub mod logger;
mod registry;
pub mod scheduler;

pub use config::TrackerConfig;
pub use logger::{FakeLogger, Logger, TracingLogger};
pub use registry::ErrorTracker;
pub use scheduler::{
    ImmediatePeriodicTaskFactory, PeriodicJob, PeriodicTaskFactory, PeriodicTaskHandle,
    TokioPeriodicTaskFactory,
};

pub use et_core::{CaughtFailure, Clock, Exception, FakeClock, MessageId, SystemClock, TrackerError, TrackingEntry};
