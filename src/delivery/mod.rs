// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Content sources for the delivery layer
//!
//! Three sources are consulted, in this order:
//!
//! - **Managed client** - an embedding SDK, plugged in through [`ManagedClient`].
//!   Its responses come back in one of several shapes and are normalized by
//!   the [`shape`] parser.
//! - **Delivery CDN** - direct HTTP calls to the read-only content-delivery
//!   endpoints ([`CdnClient`], behind the [`DeliveryApi`] trait).
//! - **Fallback document** - a static JSON file mapping content type to
//!   entries, written offline by `stacksync cache` ([`FallbackSource`]).

pub mod cdn;
pub mod fallback;
pub mod shape;

pub use cdn::{build_http_client, CdnClient, HttpClientConfig};
pub use fallback::{FallbackDocument, FallbackDocumentSource, FallbackLocation};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Result, SyncError};
use crate::models::{ContentTypeId, Record, SyncQuery, SyncResult};

/// An SDK-style client that returns raw, shape-polymorphic JSON
#[async_trait]
pub trait ManagedClient: Send + Sync {
    /// Client name for log lines
    fn name(&self) -> &'static str;

    /// Query entries of a content type; any shape accepted by [`shape::parse_entries`]
    async fn find_entries(&self, content_type: &ContentTypeId, limit: u32) -> Result<Value>;

    /// Fetch one entry; any shape accepted by [`shape::parse_entry`]
    async fn fetch_entry(&self, content_type: &ContentTypeId, uid: &str) -> Result<Value>;

    /// Whether [`ManagedClient::sync`] is available in this runtime
    fn supports_sync(&self) -> bool {
        false
    }

    /// Run a sync query; any shape accepted by [`shape::parse_sync`]
    async fn sync(&self, _query: &SyncQuery) -> Result<Value> {
        Err(SyncError::Config(format!(
            "{} does not support sync",
            self.name()
        )))
    }
}

/// Typed access to the delivery CDN endpoints
#[async_trait]
pub trait DeliveryApi: Send + Sync {
    /// `GET /v3/content_types/{type}/entries`
    async fn list_entries(&self, content_type: &ContentTypeId, limit: u32) -> Result<Vec<Record>>;

    /// `GET /v3/content_types/{type}/entries/{uid}`; `None` when the body has no entry
    async fn get_entry(&self, content_type: &ContentTypeId, uid: &str) -> Result<Option<Record>>;

    /// `GET /v3/sync`, following pagination until a sync token arrives
    async fn sync(&self, query: &SyncQuery) -> Result<SyncResult>;
}

/// Loader for the static fallback document
#[async_trait]
pub trait FallbackSource: Send + Sync {
    async fn load(&self) -> Result<FallbackDocument>;
}
