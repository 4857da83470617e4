// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Static fallback document (`cs_cache.json`)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::FallbackSource;
use crate::error::{Result, SyncError};
use crate::models::{ContentTypeId, Record};

/// Content type key to entries, as written by `stacksync cache`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FallbackDocument(BTreeMap<String, Vec<Record>>);

impl FallbackDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, content_type: &ContentTypeId, entries: Vec<Record>) {
        self.0.insert(content_type.as_str().to_string(), entries);
    }

    /// Entries stored for a content type, empty when absent
    pub fn entries_for(&self, content_type: &ContentTypeId) -> &[Record] {
        self.0
            .get(content_type.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn find(&self, content_type: &ContentTypeId, uid: &str) -> Option<&Record> {
        self.entries_for(content_type)
            .iter()
            .find(|record| record.uid() == Some(uid))
    }

    /// Total entries across all content types
    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the document as pretty JSON, creating parent directories
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Where the fallback document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackLocation {
    File(PathBuf),
    Url(String),
}

impl FallbackLocation {
    /// `http://` and `https://` values are URLs, everything else a path
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_string())
        } else {
            Self::File(PathBuf::from(raw))
        }
    }
}

/// Reads the fallback document from a file or URL
pub struct FallbackDocumentSource {
    location: FallbackLocation,
    client: reqwest::Client,
}

impl FallbackDocumentSource {
    pub fn new(location: FallbackLocation, client: reqwest::Client) -> Self {
        Self { location, client }
    }
}

#[async_trait]
impl FallbackSource for FallbackDocumentSource {
    async fn load(&self) -> Result<FallbackDocument> {
        match &self.location {
            FallbackLocation::File(path) => {
                let content = tokio::fs::read_to_string(path).await?;
                FallbackDocument::from_json(&content)
            }
            FallbackLocation::Url(url) => {
                let response = self.client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(SyncError::Http {
                        status: status.as_u16(),
                        url: url.clone(),
                    });
                }
                Ok(response.json::<FallbackDocument>().await?)
            }
        }
    }
}
