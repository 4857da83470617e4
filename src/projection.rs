// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Cached page projection
//!
//! Holds the entry a page renders for one content type (the most recent
//! entry with content). Concurrent readers share a single load, and the
//! cache is invalidated when a sync reports changed items.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::fetch::{ContentClient, FetchOptions};
use crate::models::{ContentTypeId, Record};
use crate::select;
use crate::sync::{ListenerId, SyncEvent, SyncOrchestrator};

pub struct PageCache {
    content_type: ContentTypeId,
    generation: AtomicU64,
    cached: Mutex<Option<(u64, Record)>>,
    loading: tokio::sync::Mutex<()>,
}

impl PageCache {
    pub fn new(content_type: ContentTypeId) -> Self {
        Self {
            content_type,
            generation: AtomicU64::new(0),
            cached: Mutex::new(None),
            loading: tokio::sync::Mutex::new(()),
        }
    }

    pub fn content_type(&self) -> &ContentTypeId {
        &self.content_type
    }

    /// Cached record, loading it on first use or after invalidation
    pub async fn get(&self, client: &ContentClient) -> Option<Record> {
        if let Some(record) = self.current() {
            return Some(record);
        }

        let _loading = self.loading.lock().await;
        if let Some(record) = self.current() {
            return Some(record);
        }

        let generation = self.generation.load(Ordering::SeqCst);
        let entries = client
            .fetch_entries(&self.content_type, FetchOptions::default())
            .await;
        let picked = select::latest_with_content(&self.content_type, &entries).cloned()?;
        log::debug!(
            "Cached {} entry {}",
            self.content_type,
            picked.uid().unwrap_or("<no uid>")
        );
        self.store(Some((generation, picked.clone())));
        Some(picked)
    }

    /// Drop the cached record; the next `get` reloads
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.store(None);
    }

    pub fn is_cached(&self) -> bool {
        self.current().is_some()
    }

    /// Invalidate on every data-updated event from `orchestrator`
    pub fn bind(self: &Arc<Self>, orchestrator: &SyncOrchestrator) -> ListenerId {
        let cache = Arc::downgrade(self);
        orchestrator.on_change(move |event| {
            if let SyncEvent::DataUpdated { .. } = event {
                if let Some(cache) = cache.upgrade() {
                    cache.invalidate();
                }
            }
        })
    }

    fn current(&self) -> Option<Record> {
        let generation = self.generation.load(Ordering::SeqCst);
        let cached = match self.cached.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        cached
            .filter(|(stored, _)| *stored == generation)
            .map(|(_, record)| record)
    }

    fn store(&self, value: Option<(u64, Record)>) {
        match self.cached.lock() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }
}
