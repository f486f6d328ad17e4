// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logger contract the tracker warns through.
//!
//! The template/placeholder wire format a logging sink might expose
//! (`"Unhandled exception {errorNumber} while handling message
//! {messageId}"`) is out of scope here — rendering that message is the
//! tracker's job (see [`registry::ErrorTracker::register_error`]);
//! emitting an already-rendered line is the logger's.

use parking_lot::Mutex;

/// A sink the tracker warns through on every registered failure and on
/// any internal cleanup-sweep error.
///
/// Implementations must not panic and must not block indefinitely: a
/// malfunctioning logger must never break message delivery.
pub trait Logger: Send + Sync {
    fn warn(&self, message: &str);
}

/// Default production logger: emits via `tracing::warn!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

/// Test double that records every call instead of emitting anywhere.
#[derive(Debug, Default)]
pub struct FakeLogger {
    calls: Mutex<Vec<String>>,
}

impl FakeLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages warned so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

impl Logger for FakeLogger {
    fn warn(&self, message: &str) {
        self.calls.lock().push(message.to_string());
    }
}

#[cfg(test)]
#[path = "logger_tests.rs"]
mod tests;
