// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! et-core: data model for the delivery-attempt error tracker.
//!
//! Pure types with no concurrency and no I/O: a message identifier, a
//! monotonic clock contract, an immutable caught-failure record, and the
//! append-only tracking entry they compose into. The concurrent registry
//! that owns these types lives in `et-tracker`.

pub mod clock;
pub mod entry;
pub mod error;
pub mod failure;
pub mod id;

pub use clock::{Clock, FakeClock, SystemClock};
pub use entry::TrackingEntry;
pub use error::TrackerError;
pub use failure::{CaughtFailure, Exception};
pub use id::MessageId;
