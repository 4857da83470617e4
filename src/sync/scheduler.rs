// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Fixed-interval auto-sync

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::orchestrator::SyncOrchestrator;

const MIN_PERIOD: Duration = Duration::from_secs(1);

/// Longest auto-sync period (one day)
pub const MAX_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

/// Timer period for an interval in minutes, clamped to `[1 minute, MAX_PERIOD]`
pub fn period_from_minutes(interval_minutes: u64) -> Duration {
    Duration::from_secs(interval_minutes.max(1).saturating_mul(60)).min(MAX_PERIOD)
}

/// Runs the orchestrator on a timer. At most one timer per instance.
pub struct AutoSync {
    orchestrator: Arc<SyncOrchestrator>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl AutoSync {
    pub fn new(orchestrator: Arc<SyncOrchestrator>) -> Self {
        Self {
            orchestrator,
            task: Mutex::new(None),
        }
    }

    /// Start syncing every `interval_minutes`, replacing any running timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self, interval_minutes: u64) {
        self.start_with_period(period_from_minutes(interval_minutes));
    }

    /// Start with an arbitrary period; the first tick fires one period from now.
    ///
    /// The period is clamped to `[1s, MAX_PERIOD]`.
    pub fn start_with_period(&self, period: Duration) {
        let period = period.clamp(MIN_PERIOD, MAX_PERIOD);
        let mut slot = self.slot();
        if let Some(previous) = slot.take() {
            previous.abort();
            log::debug!("Replaced running auto-sync timer");
        }

        let orchestrator = Arc::clone(&self.orchestrator);
        *slot = Some(tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match orchestrator.sync().await {
                    Ok(result) => log::debug!("Auto-sync: {} item(s)", result.items.len()),
                    Err(e) => log::warn!("Auto-sync failed: {}", e),
                }
            }
        }));
        log::info!("Auto-sync started, every {:?}", period);
    }

    /// Cancel the timer; no further ticks fire
    pub fn stop(&self) {
        if let Some(task) = self.slot().take() {
            task.abort();
            log::info!("Auto-sync stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.slot()
            .as_ref()
            .map(|task| !task.is_finished())
            .unwrap_or(false)
    }

    fn slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        match self.task.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Drop for AutoSync {
    fn drop(&mut self) {
        if let Some(task) = self.slot().take() {
            task.abort();
        }
    }
}
