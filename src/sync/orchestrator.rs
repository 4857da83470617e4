// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Incremental sync against the delivery API
//!
//! A stored token turns the next call into a delta query; without one the
//! endpoint is asked for a full bootstrap. The managed client is tried
//! first when it supports sync, then the CDN sync endpoint. A CDN failure
//! is returned to the caller.

use std::sync::Arc;

use super::events::{ListenerId, Listeners, SyncEvent};
use crate::delivery::{shape, DeliveryApi, ManagedClient};
use crate::error::Result;
use crate::fetch::ContentClient;
use crate::models::{SyncQuery, SyncResult, SyncToken};
use crate::token::TokenStore;

pub struct SyncOrchestrator {
    managed: Option<Arc<dyn ManagedClient>>,
    delivery: Arc<dyn DeliveryApi>,
    tokens: Arc<dyn TokenStore>,
    listeners: Listeners,
}

impl SyncOrchestrator {
    pub fn new(delivery: Arc<dyn DeliveryApi>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            managed: None,
            delivery,
            tokens,
            listeners: Listeners::default(),
        }
    }

    /// Share the sources of an existing content client
    pub fn for_client(client: &ContentClient, tokens: Arc<dyn TokenStore>) -> Self {
        let mut orchestrator = Self::new(Arc::clone(client.delivery()), tokens);
        orchestrator.managed = client.managed().cloned();
        orchestrator
    }

    pub fn with_managed(mut self, managed: Arc<dyn ManagedClient>) -> Self {
        self.managed = Some(managed);
        self
    }

    /// Register a change handler
    pub fn on_change<F>(&self, handler: F) -> ListenerId
    where
        F: Fn(&SyncEvent) + Send + Sync + 'static,
    {
        self.listeners.add(Arc::new(handler))
    }

    /// Unregister a handler; false if it was not registered
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn stored_token(&self) -> Option<SyncToken> {
        self.tokens.get()
    }

    /// Forget the stored token so the next sync bootstraps
    pub fn reset_token(&self) {
        self.tokens.clear();
    }

    /// Query the next sync will send
    pub fn next_query(&self) -> SyncQuery {
        SyncQuery::from_token(self.tokens.get())
    }

    /// Sync from the stored token (or bootstrap)
    pub async fn sync(&self) -> Result<SyncResult> {
        self.sync_with(self.next_query()).await
    }

    /// Sync with an explicit query
    pub async fn sync_with(&self, query: SyncQuery) -> Result<SyncResult> {
        log::debug!("Starting sync with {:?}", query);

        if let Some(managed) = self.managed.as_ref().filter(|m| m.supports_sync()) {
            match managed.sync(&query).await.and_then(shape::parse_sync) {
                Ok(result) => return Ok(self.finish(result)),
                Err(e) => log::debug!(
                    "{} sync failed, falling back to CDN sync: {}",
                    managed.name(),
                    e
                ),
            }
        }

        match self.delivery.sync(&query).await {
            Ok(result) => Ok(self.finish(result)),
            Err(e) => {
                log::error!("CDN sync failed: {}", e);
                Err(e)
            }
        }
    }

    fn finish(&self, result: SyncResult) -> SyncResult {
        match &result.sync_token {
            Some(token) => {
                log::debug!("New sync token {}", token.preview());
                self.tokens.set(Some(token.clone()));
            }
            None => log::debug!("Sync response carried no sync token"),
        }

        log::info!("Sync completed: {} item(s) changed", result.items.len());
        self.listeners.emit(&SyncEvent::Synced(result.clone()));
        if result.has_changes() {
            self.listeners.emit(&SyncEvent::DataUpdated {
                updated_items: result.items.len(),
                sync_token: result.sync_token.clone(),
            });
        }
        result
    }
}
