// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Periodic-task scheduler contract.
//!
//! The tracker does not own how background jobs get scheduled — that is
//! the bus's job — but it drives the lifecycle of its own cleanup task
//! through this contract: `create` spawns the job on a fixed interval,
//! `start` begins ticking, `dispose` cancels it. `dispose` is idempotent
//! and does not block waiting for an in-flight tick to finish; the
//! tracker only relies on "no new invocation begins after dispose
//! returns."

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// A unit of recurring work.
#[async_trait]
pub trait PeriodicJob: Send + Sync {
    async fn run(&self);
}

/// Handle to a running (or not-yet-started, or disposed) periodic task.
pub trait PeriodicTaskHandle: Send + Sync {
    /// Begin ticking. Calling `start` more than once has no additional
    /// effect.
    fn start(&self);

    /// Cancel the task. Idempotent: a second call is a no-op.
    fn dispose(&self);
}

/// Produces periodic-task handles, given a name, an interval, and a job.
pub trait PeriodicTaskFactory: Send + Sync {
    fn create(
        &self,
        name: &str,
        interval: Duration,
        job: Arc<dyn PeriodicJob>,
    ) -> Arc<dyn PeriodicTaskHandle>;
}

/// Production factory: one `tokio::spawn`ed task per handle, ticking on
/// `tokio::time::interval` and selecting against a shutdown [`Notify`] the
/// same way the checkpoint/flush background tasks do in this workspace's
/// daemon.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPeriodicTaskFactory;

impl PeriodicTaskFactory for TokioPeriodicTaskFactory {
    fn create(
        &self,
        name: &str,
        interval: Duration,
        job: Arc<dyn PeriodicJob>,
    ) -> Arc<dyn PeriodicTaskHandle> {
        Arc::new(TokioPeriodicTask::new(name, interval, job))
    }
}

struct TokioPeriodicTask {
    name: String,
    interval: Duration,
    job: Arc<dyn PeriodicJob>,
    shutdown: Arc<Notify>,
    started: AtomicBool,
    disposed: AtomicBool,
}

impl TokioPeriodicTask {
    fn new(name: &str, interval: Duration, job: Arc<dyn PeriodicJob>) -> Self {
        Self {
            name: name.to_string(),
            interval,
            job,
            shutdown: Arc::new(Notify::new()),
            started: AtomicBool::new(false),
            disposed: AtomicBool::new(false),
        }
    }
}

impl PeriodicTaskHandle for TokioPeriodicTask {
    fn start(&self) {
        if self.started.swap(true, Ordering::SeqCst) {
            return;
        }

        let name = self.name.clone();
        let interval_dur = self.interval;
        let job = Arc::clone(&self.job);
        let shutdown = Arc::clone(&self.shutdown);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(interval_dur);
            // The first tick fires immediately; consume it so the job
            // only runs once per `interval_dur` has actually elapsed.
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        job.run().await;
                    }
                    _ = shutdown.notified() => {
                        tracing::debug!(task = %name, "periodic task disposed");
                        break;
                    }
                }
            }
        });
    }

    fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.shutdown.notify_one();
    }
}

/// Test double that never waits for a real interval to elapse: `start()`
/// only marks the handle as live, and each call to
/// [`ImmediatePeriodicTaskFactory::tick`] runs every non-disposed handle's
/// job once, standing in for a real interval firing. Unlike
/// [`TokioPeriodicTaskFactory`], `create`/`start` never touch the tokio
/// runtime, so this factory can back an [`crate::ErrorTracker`]
/// constructed from a plain synchronous test. Used by the idle-reclamation
/// scenario test in place of a real sleep.
#[derive(Default)]
pub struct ImmediatePeriodicTaskFactory {
    handles: parking_lot::Mutex<Vec<Arc<ImmediateTask>>>,
}

impl ImmediatePeriodicTaskFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every created handle's job once, as if its interval had
    /// elapsed, skipping disposed handles.
    pub async fn tick(&self) {
        let handles: Vec<_> = self.handles.lock().clone();
        for handle in handles {
            if !handle.disposed.load(Ordering::SeqCst) {
                handle.job.run().await;
            }
        }
    }
}

impl PeriodicTaskFactory for ImmediatePeriodicTaskFactory {
    fn create(
        &self,
        _name: &str,
        _interval: Duration,
        job: Arc<dyn PeriodicJob>,
    ) -> Arc<dyn PeriodicTaskHandle> {
        let handle = Arc::new(ImmediateTask {
            job,
            disposed: AtomicBool::new(false),
        });
        self.handles.lock().push(Arc::clone(&handle));
        handle
    }
}

struct ImmediateTask {
    job: Arc<dyn PeriodicJob>,
    disposed: AtomicBool,
}

impl PeriodicTaskHandle for ImmediateTask {
    fn start(&self) {}

    fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
