// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Delivery CDN client
//!
//! Direct HTTP access to the read-only content-delivery endpoints.
//!
//! ## Authentication
//!
//! Every request carries the stack API key (`api_key` header) and the
//! delivery token (`access_token` header).

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use super::DeliveryApi;
use crate::config::StackConfig;
use crate::error::{Result, SyncError};
use crate::models::{ContentTypeId, Record, SyncQuery, SyncResult};

/// Upper bound on pages followed for one sync call
pub const MAX_SYNC_PAGES: usize = 50;

/// HTTP client configuration for the delivery CDN
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: format!("stacksync/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Build a configured HTTP client
pub fn build_http_client(config: &HttpClientConfig) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(&config.user_agent)
        .build()?)
}

/// Client for the delivery CDN
#[derive(Clone)]
pub struct CdnClient {
    host: String,
    api_key: String,
    delivery_token: String,
    environment: String,
    locale: String,
    client: reqwest::Client,
}

impl CdnClient {
    pub fn new(config: &StackConfig) -> Result<Self> {
        let http = HttpClientConfig {
            timeout_secs: config.timeout_secs,
            ..HttpClientConfig::default()
        };
        Ok(Self::with_client(config, build_http_client(&http)?))
    }

    /// Reuse an existing HTTP client
    pub fn with_client(config: &StackConfig, client: reqwest::Client) -> Self {
        Self {
            host: config.cdn_host.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            delivery_token: config.delivery_token.clone(),
            environment: config.environment.clone(),
            locale: config.locale.clone(),
            client,
        }
    }

    /// Entry-list URL with a cache-busting `_` parameter
    pub fn entries_url(&self, content_type: &ContentTypeId, limit: u32, cache_buster: i64) -> String {
        format!(
            "{}/v3/content_types/{}/entries?{}&limit={}&_={}",
            self.host,
            urlencoding::encode(content_type.as_str()),
            self.scope_params(),
            limit,
            cache_buster
        )
    }

    pub fn entry_url(&self, content_type: &ContentTypeId, uid: &str) -> String {
        format!(
            "{}/v3/content_types/{}/entries/{}?{}",
            self.host,
            urlencoding::encode(content_type.as_str()),
            urlencoding::encode(uid),
            self.scope_params()
        )
    }

    pub fn count_url(&self, content_type: &ContentTypeId) -> String {
        format!(
            "{}/v3/content_types/{}/entries?{}&include_count=true&limit=1",
            self.host,
            urlencoding::encode(content_type.as_str()),
            self.scope_params()
        )
    }

    pub fn sync_url(&self, query: &SyncQuery) -> String {
        let params: Vec<String> = query
            .params()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
            .collect();
        format!(
            "{}/v3/sync?{}&{}",
            self.host,
            params.join("&"),
            self.scope_params()
        )
    }

    /// Number of published entries for a content type
    pub async fn count_entries(&self, content_type: &ContentTypeId) -> Result<u64> {
        let json = self.get_json(&self.count_url(content_type)).await?;
        Ok(json.get("count").and_then(Value::as_u64).unwrap_or(0))
    }

    fn scope_params(&self) -> String {
        format!(
            "environment={}&locale={}",
            urlencoding::encode(&self.environment),
            urlencoding::encode(&self.locale)
        )
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        let request_id = uuid::Uuid::new_v4().to_string();
        log::debug!("GET {} (request {})", url, request_id);

        let response = self
            .client
            .get(url)
            .header("api_key", &self.api_key)
            .header("access_token", &self.delivery_token)
            .header("x-request-id", &request_id)
            .header("cache-control", "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::warn!(
                "CDN request failed: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            );
            return Err(SyncError::Http {
                status: status.as_u16(),
                url: strip_query(url).to_string(),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl DeliveryApi for CdnClient {
    async fn list_entries(&self, content_type: &ContentTypeId, limit: u32) -> Result<Vec<Record>> {
        let url = self.entries_url(content_type, limit, chrono::Utc::now().timestamp_millis());
        let json = self.get_json(&url).await?;
        entries_from_body(json)
    }

    async fn get_entry(&self, content_type: &ContentTypeId, uid: &str) -> Result<Option<Record>> {
        let json = self.get_json(&self.entry_url(content_type, uid)).await?;
        Ok(json
            .get("entry")
            .cloned()
            .and_then(Record::from_value))
    }

    async fn sync(&self, query: &SyncQuery) -> Result<SyncResult> {
        let mut merged = SyncResult::default();
        let mut next = query.clone();

        for page in 1..=MAX_SYNC_PAGES {
            let json = self.get_json(&self.sync_url(&next)).await?;
            let result: SyncResult = serde_json::from_value(json)?;
            merged.items.extend(result.items);
            merged.total_count = result.total_count.or(merged.total_count);

            if let Some(token) = result.sync_token {
                merged.sync_token = Some(token);
                merged.pagination_token = None;
                return Ok(merged);
            }
            match result.pagination_token {
                Some(pagination) => {
                    log::debug!("Sync page {} done, following pagination token", page);
                    merged.pagination_token = Some(pagination.clone());
                    next = SyncQuery::Pagination(pagination);
                }
                None => return Ok(merged),
            }
        }

        log::warn!(
            "Sync stopped after {} pages without a sync token",
            MAX_SYNC_PAGES
        );
        Ok(merged)
    }
}

/// Extract `entries` from a CDN list body; a missing field reads as empty
fn entries_from_body(json: Value) -> Result<Vec<Record>> {
    match json.get("entries") {
        Some(Value::Array(items)) => Ok(items
            .iter()
            .cloned()
            .filter_map(Record::from_value)
            .collect()),
        Some(_) => Err(SyncError::UnrecognizedShape(
            "CDN `entries` is not an array".to_string(),
        )),
        None => Ok(Vec::new()),
    }
}

fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}
