// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The concurrent error-tracking registry.

use crate::cleanup::CleanupJob;
use crate::config::TrackerConfig;
use crate::logger::Logger;
use crate::scheduler::{PeriodicTaskFactory, PeriodicTaskHandle};
use et_core::{Clock, Exception, MessageId, TrackerError, TrackingEntry};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Registry state shared between the public API and the background
/// cleanup job. Split out of [`ErrorTracker`] so [`CleanupJob`] can hold
/// an `Arc` to just this part without also holding the scheduler handle
/// it would otherwise need to dispose of itself.
pub(crate) struct Inner {
    pub(crate) entries: Mutex<HashMap<MessageId, TrackingEntry>>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) logger: Arc<dyn Logger>,
    pub(crate) config: TrackerConfig,
}

/// Delivery-attempt error tracker: decides whether a message that keeps
/// failing should be retried again or handed to the poison/dead-letter
/// sink.
///
/// Consulted once per delivery attempt via
/// [`has_failed_too_many_times`](Self::has_failed_too_many_times) and
/// updated on every handler failure via
/// [`register_error`](Self::register_error). A background cleanup task
/// (started in [`new`](Self::new), stopped in [`dispose`](Self::dispose))
/// evicts entries idle beyond `reclaim_idle_after` so memory stays
/// bounded for messages that never reach `clean_up` (e.g. because a
/// worker crashed between failing and dead-lettering).
///
/// State machine: `Constructed → Initialized (cleanup running) →
/// Disposed (cleanup stopped)`. `register_error` / `has_failed_too_many_times`
/// / `clean_up` remain valid after `dispose`; they simply stop being
/// accompanied by background reclamation.
pub struct ErrorTracker {
    inner: Arc<Inner>,
    cleanup_task: Arc<dyn PeriodicTaskHandle>,
    disposed: AtomicBool,
}

impl ErrorTracker {
    /// Construct and start the tracker, including its background cleanup
    /// task.
    ///
    /// Fails with `InvalidArgument` if `config.max_delivery_attempts < 1`.
    pub fn new(
        config: TrackerConfig,
        clock: Arc<dyn Clock>,
        logger: Arc<dyn Logger>,
        scheduler: Arc<dyn PeriodicTaskFactory>,
    ) -> Result<Self, TrackerError> {
        config.validate()?;

        let inner = Arc::new(Inner {
            entries: Mutex::new(HashMap::new()),
            clock,
            logger,
            config,
        });

        let cleanup_job = Arc::new(CleanupJob {
            inner: Arc::clone(&inner),
        });
        let cleanup_task = scheduler.create(
            &inner.config.cleanup_task_name,
            inner.config.cleanup_interval,
            cleanup_job,
        );
        cleanup_task.start();

        Ok(Self {
            inner,
            cleanup_task,
            disposed: AtomicBool::new(false),
        })
    }

    /// Record a failed delivery attempt for `id`.
    ///
    /// Inserts a fresh entry if none exists, otherwise replaces the
    /// existing entry with `existing.extend(exception, final)`, honoring
    /// the sticky-final rule. Always emits a warning log, appending
    /// `(FINAL)` when the entry is now final — including on a call that
    /// merely observed an already-final entry and changed nothing, in
    /// which case the logged count is the unchanged, stale count.
    ///
    /// Errors with `InvalidArgument` if `id` is empty.
    pub fn register_error(
        &self,
        id: &MessageId,
        exception: Exception,
        is_final: bool,
    ) -> Result<(), TrackerError> {
        if id.is_empty() {
            return Err(TrackerError::InvalidArgument(
                "message id must not be empty".to_string(),
            ));
        }

        let (count, now_final) = {
            let mut entries = self.inner.entries.lock();
            let entry = entries
                .entry(id.clone())
                .and_modify(|existing| {
                    *existing = existing.extend(Arc::clone(&exception), self.inner.clock.as_ref(), is_final);
                })
                .or_insert_with(|| {
                    TrackingEntry::new(Arc::clone(&exception), self.inner.clock.as_ref(), is_final)
                });
            (entry.failure_count(), entry.is_final())
        };

        let suffix = if now_final { " (FINAL)" } else { "" };
        self.inner.logger.warn(&format!(
            "Unhandled exception {count} while handling message {id}{suffix}"
        ));

        Ok(())
    }

    /// True iff an entry exists for `id` and it is either final or has
    /// reached `max_delivery_attempts` failures. Never fails; absence of
    /// an entry is simply `false`.
    pub fn has_failed_too_many_times(&self, id: &MessageId) -> bool {
        let entries = self.inner.entries.lock();
        match entries.get(id) {
            None => false,
            Some(entry) => {
                entry.is_final()
                    || entry.failure_count() as u32 >= self.inner.config.max_delivery_attempts
            }
        }
    }

    /// `"<n> unhandled exceptions"`, or `None` if no entry exists.
    pub fn short_description(&self, id: &MessageId) -> Option<String> {
        let entries = self.inner.entries.lock();
        let entry = entries.get(id)?;
        Some(format!("{} unhandled exceptions", entry.failure_count()))
    }

    /// `"<n> unhandled exceptions: <line1>\n<line2>\n…"`, one line per
    /// failure in chronological order, or `None` if no entry exists.
    pub fn full_description(&self, id: &MessageId) -> Option<String> {
        let entries = self.inner.entries.lock();
        let entry = entries.get(id)?;

        let lines: Vec<String> = entry
            .failures()
            .iter()
            .map(|failure| {
                let elapsed = self.inner.clock.elapsed_since(failure.time());
                format!("{}ms ago: {}", elapsed.as_millis(), failure.rendered())
            })
            .collect();

        Some(format!(
            "{} unhandled exceptions: {}",
            entry.failure_count(),
            lines.join("\n")
        ))
    }

    /// A stable snapshot of the exceptions recorded for `id`, in
    /// chronological order. Empty if no entry exists. Decoupled from the
    /// registry: later `register_error` calls do not affect an already
    /// returned snapshot.
    pub fn exceptions(&self, id: &MessageId) -> Vec<Exception> {
        let entries = self.inner.entries.lock();
        match entries.get(id) {
            None => Vec::new(),
            Some(entry) => entry
                .failures()
                .iter()
                .map(|failure| Arc::clone(failure.exception()))
                .collect(),
        }
    }

    /// Remove the entry for `id` if present. No-op otherwise. Never
    /// fails.
    pub fn clean_up(&self, id: &MessageId) {
        self.inner.entries.lock().remove(id);
    }

    /// Number of entries currently tracked. Exposed for diagnostics and
    /// tests; not one of the tracker's core operations.
    pub fn len(&self) -> usize {
        self.inner.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stop the background cleanup task. Idempotent and safe to call more
    /// than once; `register_error` / `has_failed_too_many_times` /
    /// `clean_up` remain valid afterward, they simply no longer benefit
    /// from background reclamation.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.cleanup_task.dispose();
    }
}

impl Drop for ErrorTracker {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
