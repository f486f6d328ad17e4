// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::{Clock, FakeClock};
use std::fmt;

#[derive(Debug)]
struct BoomError(String);

impl fmt::Display for BoomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "boom: {}", self.0)
    }
}

impl std::error::Error for BoomError {}

fn exception(msg: &str) -> Exception {
    Arc::new(BoomError(msg.to_string()))
}

#[test]
fn captures_time_at_construction() {
    let clock = FakeClock::new();
    let t0 = clock.now();
    let failure = CaughtFailure::new(exception("first"), &clock);
    assert_eq!(failure.time(), t0);
}

#[test]
fn renders_eagerly() {
    let clock = FakeClock::new();
    let failure = CaughtFailure::new(exception("disk full"), &clock);
    assert_eq!(failure.rendered(), "boom: disk full");
}

#[test]
fn rendered_string_is_independent_of_later_mutation() {
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Mutable(AtomicU32);
    impl fmt::Display for Mutable {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "count={}", self.0.load(Ordering::SeqCst))
        }
    }
    impl fmt::Debug for Mutable {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{self}")
        }
    }
    impl std::error::Error for Mutable {}

    let clock = FakeClock::new();
    let inner = Arc::new(Mutable(AtomicU32::new(1)));
    let exception: Exception = inner.clone();
    let failure = CaughtFailure::new(exception, &clock);

    inner.0.store(99, Ordering::SeqCst);

    assert_eq!(failure.rendered(), "count=1");
}
