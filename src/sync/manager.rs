// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Sync lifecycle: initial sync, auto-sync, manual triggers

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::orchestrator::SyncOrchestrator;
use super::scheduler::{self, AutoSync};
use crate::error::Result;
use crate::models::SyncResult;

/// Snapshot of the manager state
#[derive(Debug, Clone, Serialize)]
pub struct ManagerStatus {
    pub initialized: bool,
    pub last_sync: Option<DateTime<Utc>>,
    pub in_progress: bool,
    pub auto_sync_running: bool,
}

pub struct SyncManager {
    orchestrator: Arc<SyncOrchestrator>,
    auto_sync: AutoSync,
    initialized: AtomicBool,
    in_progress: AtomicBool,
    last_sync: Mutex<Option<DateTime<Utc>>>,
}

/// Clears the in-progress flag when dropped
struct InProgress<'a>(&'a AtomicBool);

impl Drop for InProgress<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl SyncManager {
    pub fn new(orchestrator: Arc<SyncOrchestrator>) -> Self {
        Self {
            auto_sync: AutoSync::new(Arc::clone(&orchestrator)),
            orchestrator,
            initialized: AtomicBool::new(false),
            in_progress: AtomicBool::new(false),
            last_sync: Mutex::new(None),
        }
    }

    pub fn orchestrator(&self) -> &Arc<SyncOrchestrator> {
        &self.orchestrator
    }

    /// Run the initial sync and start auto-sync every `interval_minutes`.
    ///
    /// A failed initial sync is logged and does not prevent auto-sync from
    /// starting. Calling again after success is a no-op.
    pub async fn initialize(&self, interval_minutes: u64) -> Option<SyncResult> {
        self.initialize_with_period(scheduler::period_from_minutes(interval_minutes))
            .await
    }

    pub async fn initialize_with_period(&self, period: Duration) -> Option<SyncResult> {
        if self.initialized.load(Ordering::SeqCst) {
            return None;
        }
        log::info!("Initializing sync manager");

        let initial = match self.run_guarded().await {
            Some(Ok(result)) => Some(result),
            Some(Err(e)) => {
                log::warn!("Initial sync failed, relying on cached content: {}", e);
                None
            }
            None => None,
        };

        self.auto_sync.start_with_period(period);
        self.initialized.store(true, Ordering::SeqCst);
        initial
    }

    /// Manual sync. Returns `Ok(None)` when another manual sync is running.
    pub async fn trigger_sync(&self) -> Result<Option<SyncResult>> {
        match self.run_guarded().await {
            Some(result) => result.map(Some),
            None => {
                log::info!("Sync already in progress, skipping");
                Ok(None)
            }
        }
    }

    pub fn status(&self) -> ManagerStatus {
        ManagerStatus {
            initialized: self.initialized.load(Ordering::SeqCst),
            last_sync: self.last_sync(),
            in_progress: self.in_progress.load(Ordering::SeqCst),
            auto_sync_running: self.auto_sync.is_running(),
        }
    }

    /// Stop auto-sync; `initialize` may be called again afterwards
    pub fn shutdown(&self) {
        self.auto_sync.stop();
        self.initialized.store(false, Ordering::SeqCst);
        log::info!("Sync manager shut down");
    }

    fn last_sync(&self) -> Option<DateTime<Utc>> {
        match self.last_sync.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    async fn run_guarded(&self) -> Option<Result<SyncResult>> {
        if self
            .in_progress
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return None;
        }
        let _guard = InProgress(&self.in_progress);

        let result = self.orchestrator.sync().await;
        if result.is_ok() {
            let now = Utc::now();
            match self.last_sync.lock() {
                Ok(mut guard) => *guard = Some(now),
                Err(poisoned) => *poisoned.into_inner() = Some(now),
            }
        }
        Some(result)
    }
}
