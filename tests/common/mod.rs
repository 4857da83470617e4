//! Shared fakes for the delivery seams
//!
//! In-memory implementations of `DeliveryApi`, `ManagedClient` and
//! `FallbackSource` that record how they were called.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use stacksync::delivery::{DeliveryApi, FallbackDocument, FallbackSource, ManagedClient};
use stacksync::error::{Result, SyncError};
use stacksync::models::{ContentTypeId, Record, SyncQuery, SyncResult, SyncToken};

/// Build a record from a JSON object literal
pub fn record(value: Value) -> Record {
    Record::from_value(value).expect("record must be a JSON object")
}

/// Sync payload with the given items and token
pub fn sync_payload(items: Vec<Value>, token: &str) -> SyncResult {
    SyncResult {
        items: items.into_iter().map(record).collect(),
        sync_token: SyncToken::new(token),
        ..SyncResult::default()
    }
}

pub fn server_error() -> SyncError {
    SyncError::Http {
        status: 500,
        url: "https://cdn.contentstack.io/v3/sync".to_string(),
    }
}

// ============================================================================
// Delivery CDN
// ============================================================================

#[derive(Default)]
pub struct FakeDelivery {
    entries: HashMap<String, Vec<Record>>,
    fail_entries: bool,
    sync_responses: Mutex<VecDeque<Result<SyncResult>>>,
    pub list_calls: AtomicUsize,
    pub get_calls: AtomicUsize,
    pub sync_queries: Mutex<Vec<SyncQuery>>,
}

impl FakeDelivery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(mut self, content_type: &ContentTypeId, entries: Vec<Value>) -> Self {
        self.entries.insert(
            content_type.as_str().to_string(),
            entries.into_iter().map(record).collect(),
        );
        self
    }

    /// Every entry request fails with HTTP 500
    pub fn failing(mut self) -> Self {
        self.fail_entries = true;
        self
    }

    /// Queue a sync response; an empty queue answers with an empty result
    pub fn push_sync(&self, response: Result<SyncResult>) {
        self.sync_responses.lock().unwrap().push_back(response);
    }

    pub fn list_call_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn sync_call_count(&self) -> usize {
        self.sync_queries.lock().unwrap().len()
    }

    pub fn last_sync_query(&self) -> Option<SyncQuery> {
        self.sync_queries.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl DeliveryApi for FakeDelivery {
    async fn list_entries(&self, content_type: &ContentTypeId, _limit: u32) -> Result<Vec<Record>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_entries {
            return Err(server_error());
        }
        Ok(self
            .entries
            .get(content_type.as_str())
            .cloned()
            .unwrap_or_default())
    }

    async fn get_entry(&self, content_type: &ContentTypeId, uid: &str) -> Result<Option<Record>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_entries {
            return Err(server_error());
        }
        Ok(self
            .entries
            .get(content_type.as_str())
            .and_then(|entries| entries.iter().find(|r| r.uid() == Some(uid)).cloned()))
    }

    async fn sync(&self, query: &SyncQuery) -> Result<SyncResult> {
        self.sync_queries.lock().unwrap().push(query.clone());
        self.sync_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(SyncResult::default()))
    }
}

// ============================================================================
// Managed Client
// ============================================================================

/// Managed client answering every call with fixed raw JSON
pub struct FakeManaged {
    entries: Option<Value>,
    entry: Option<Value>,
    sync: Option<Value>,
    pub calls: AtomicUsize,
}

impl FakeManaged {
    /// `None` responses fail with a network-style error
    pub fn new(entries: Option<Value>) -> Self {
        Self {
            entries,
            entry: None,
            sync: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_entry(mut self, entry: Value) -> Self {
        self.entry = Some(entry);
        self
    }

    pub fn with_sync(mut self, sync: Value) -> Self {
        self.sync = Some(sync);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer(&self, value: &Option<Value>) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        value
            .clone()
            .ok_or_else(|| SyncError::Config("managed client offline".to_string()))
    }
}

#[async_trait]
impl ManagedClient for FakeManaged {
    fn name(&self) -> &'static str {
        "fake-sdk"
    }

    async fn find_entries(&self, _content_type: &ContentTypeId, _limit: u32) -> Result<Value> {
        self.answer(&self.entries)
    }

    async fn fetch_entry(&self, _content_type: &ContentTypeId, _uid: &str) -> Result<Value> {
        self.answer(&self.entry)
    }

    fn supports_sync(&self) -> bool {
        self.sync.is_some()
    }

    async fn sync(&self, _query: &SyncQuery) -> Result<Value> {
        self.answer(&self.sync)
    }
}

// ============================================================================
// Fallback Document
// ============================================================================

pub struct StaticFallback {
    document: FallbackDocument,
    pub loads: AtomicUsize,
}

impl StaticFallback {
    pub fn new(entries: Vec<(ContentTypeId, Vec<Value>)>) -> Self {
        let mut document = FallbackDocument::new();
        for (content_type, records) in entries {
            document.insert(&content_type, records.into_iter().map(record).collect());
        }
        Self {
            document,
            loads: AtomicUsize::new(0),
        }
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FallbackSource for StaticFallback {
    async fn load(&self) -> Result<FallbackDocument> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.document.clone())
    }
}
