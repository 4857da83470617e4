// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Entry fetching with source fallback
//!
//! List reads never fail: every source error is logged and the call
//! degrades to an empty list. Single-entry reads propagate
//! [`SyncError::EntryNotFound`] once every source is exhausted.

use std::sync::Arc;

use crate::config::{StackConfig, DEFAULT_LIMIT};
use crate::delivery::{
    build_http_client, shape, CdnClient, DeliveryApi, FallbackDocumentSource, FallbackLocation,
    FallbackSource, HttpClientConfig, ManagedClient,
};
use crate::error::{Result, SyncError};
use crate::filter;
use crate::models::{ContentTypeId, Record};

/// Options for list fetches
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    /// Maximum number of entries to request
    pub limit: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Fetches entries from the managed client, the CDN and the fallback document
#[derive(Clone)]
pub struct ContentClient {
    managed: Option<Arc<dyn ManagedClient>>,
    delivery: Arc<dyn DeliveryApi>,
    fallback: Option<Arc<dyn FallbackSource>>,
}

impl ContentClient {
    /// CDN client plus the configured fallback document
    pub fn from_config(config: &StackConfig) -> Result<Self> {
        if !config.has_credentials() {
            log::warn!(
                "Delivery API key or token not provided; set CS_API_KEY and CS_DELIVERY_TOKEN for live content"
            );
        }
        let http = build_http_client(&HttpClientConfig {
            timeout_secs: config.timeout_secs,
            ..HttpClientConfig::default()
        })?;
        let delivery = CdnClient::with_client(config, http.clone());
        let mut client = Self::new(Arc::new(delivery));
        if config.cache_fallback {
            client = client.with_fallback(Arc::new(FallbackDocumentSource::new(
                FallbackLocation::parse(&config.cache_path),
                http,
            )));
        }
        Ok(client)
    }

    pub fn new(delivery: Arc<dyn DeliveryApi>) -> Self {
        Self {
            managed: None,
            delivery,
            fallback: None,
        }
    }

    pub fn with_managed(mut self, managed: Arc<dyn ManagedClient>) -> Self {
        self.managed = Some(managed);
        self
    }

    /// Enable the fallback document
    pub fn with_fallback(mut self, fallback: Arc<dyn FallbackSource>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn managed(&self) -> Option<&Arc<dyn ManagedClient>> {
        self.managed.as_ref()
    }

    pub fn delivery(&self) -> &Arc<dyn DeliveryApi> {
        &self.delivery
    }

    /// Fetch entries of a content type; never fails.
    ///
    /// The first non-empty source wins. CDN and fallback-document results
    /// are pruned of blank scaffolds unless that would leave nothing.
    pub async fn fetch_entries(
        &self,
        content_type: &ContentTypeId,
        options: FetchOptions,
    ) -> Vec<Record> {
        log::debug!(
            "Fetching entries for {} (limit {})",
            content_type,
            options.limit
        );

        if let Some(managed) = &self.managed {
            match managed.find_entries(content_type, options.limit).await {
                Ok(raw) => match shape::parse_entries(raw) {
                    Ok(entries) if !entries.is_empty() => {
                        log::debug!(
                            "Found {} {} entries via {}",
                            entries.len(),
                            content_type,
                            managed.name()
                        );
                        return entries;
                    }
                    Ok(_) => log::debug!("{} returned no {} entries", managed.name(), content_type),
                    Err(e) => log::warn!("{} response for {}: {}", managed.name(), content_type, e),
                },
                Err(e) => log::debug!(
                    "{} fetch for {} failed, trying CDN: {}",
                    managed.name(),
                    content_type,
                    e
                ),
            }
        }

        match self.delivery.list_entries(content_type, options.limit).await {
            Ok(entries) if !entries.is_empty() => {
                log::debug!("Found {} {} entries via CDN", entries.len(), content_type);
                return filter::prune_or_keep(content_type, entries);
            }
            Ok(_) => log::debug!("CDN returned no {} entries", content_type),
            Err(e) => log::debug!("CDN fetch for {} failed: {}", content_type, e),
        }

        if let Some(fallback) = &self.fallback {
            match fallback.load().await {
                Ok(document) => {
                    let entries = document.entries_for(content_type).to_vec();
                    if !entries.is_empty() {
                        log::debug!(
                            "Found {} {} entries in fallback document",
                            entries.len(),
                            content_type
                        );
                        return filter::prune_or_keep(content_type, entries);
                    }
                }
                Err(e) => log::debug!("Fallback document unavailable: {}", e),
            }
        }

        Vec::new()
    }

    /// Fetch one entry by uid; fails with `EntryNotFound` when no source has it
    pub async fn fetch_entry_by_uid(&self, content_type: &ContentTypeId, uid: &str) -> Result<Record> {
        if let Some(managed) = &self.managed {
            match managed.fetch_entry(content_type, uid).await {
                Ok(raw) => match shape::parse_entry(raw) {
                    Ok(record) => return Ok(record),
                    Err(e) => log::warn!("{} response for {}/{}: {}", managed.name(), content_type, uid, e),
                },
                Err(e) => log::debug!("{} entry fetch failed: {}", managed.name(), e),
            }
        }

        match self.delivery.get_entry(content_type, uid).await {
            Ok(Some(record)) => return Ok(record),
            Ok(None) => log::debug!("CDN body had no entry for {}/{}", content_type, uid),
            Err(e) => log::debug!("CDN entry fetch failed: {}", e),
        }

        if let Some(fallback) = &self.fallback {
            match fallback.load().await {
                Ok(document) => {
                    if let Some(record) = document.find(content_type, uid) {
                        return Ok(record.clone());
                    }
                }
                Err(e) => log::debug!("Fallback document unavailable: {}", e),
            }
        }

        Err(SyncError::EntryNotFound {
            content_type: content_type.to_string(),
            uid: uid.to_string(),
        })
    }
}
