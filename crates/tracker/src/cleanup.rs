// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background reclamation of idle entries.

use crate::registry::Inner;
use crate::scheduler::PeriodicJob;
use async_trait::async_trait;
use std::sync::Arc;

/// Remove every entry that has sat idle (no new failure) longer than
/// `inner.config.reclaim_idle_after`. Returns the number removed.
///
/// Snapshot-then-remove: the idle keys are collected under one lock
/// acquisition, then removed under a second. A `register_error` for one
/// of those keys landing in between is tolerated, not guarded against —
/// the freshly registered failure is simply reclaimed early, same as a
/// message that fails again a moment after being dead-lettered.
pub(crate) fn sweep(inner: &Inner) -> usize {
    let idle: Vec<_> = {
        let entries = inner.entries.lock();
        entries
            .iter()
            .filter(|(_, entry)| {
                entry.elapsed_since_last_failure(inner.clock.as_ref()) > inner.config.reclaim_idle_after
            })
            .map(|(id, _)| id.clone())
            .collect()
    };

    if idle.is_empty() {
        return 0;
    }

    let mut entries = inner.entries.lock();
    let mut removed = 0;
    for id in idle {
        if entries.remove(&id).is_some() {
            removed += 1;
        }
    }
    removed
}

/// Periodic job that sweeps the registry on every tick, logging (rather
/// than propagating) the count reclaimed.
pub(crate) struct CleanupJob {
    pub(crate) inner: Arc<Inner>,
}

#[async_trait]
impl PeriodicJob for CleanupJob {
    async fn run(&self) {
        let removed = sweep(&self.inner);
        if removed > 0 {
            self.inner
                .logger
                .warn(&format!("Reclaimed {removed} idle tracked message(s)"));
        }
    }
}

#[cfg(test)]
#[path = "cleanup_tests.rs"]
mod tests;
