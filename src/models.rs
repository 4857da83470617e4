// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: Apache-2.0
//! Data models for delivery API content and sync state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::SyncError;

// ============================================================================
// Records
// ============================================================================

/// A single entry returned by the delivery API.
///
/// Records are read-only projections of remote state. The shape varies by
/// content type, so fields are kept as raw JSON and read structurally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build a record from a JSON value, rejecting anything but an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn uid(&self) -> Option<&str> {
        self.str_field("uid")
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// String value of a field, `None` when missing or not a string
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp("updated_at")
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp("created_at")
    }

    /// `updated_at`, falling back to `created_at`
    pub fn recency(&self) -> Option<DateTime<Utc>> {
        self.updated_at().or_else(|| self.created_at())
    }

    /// Content type uid carried by sync items (`content_type_uid`,
    /// `content_type`, `_content_type_uid` or `sys.content_type_uid`)
    pub fn content_type_uid(&self) -> Option<&str> {
        self.str_field("content_type_uid")
            .or_else(|| self.str_field("content_type"))
            .or_else(|| self.str_field("_content_type_uid"))
            .or_else(|| {
                self.get("sys")
                    .and_then(|sys| sys.get("content_type_uid"))
                    .and_then(Value::as_str)
            })
    }

    fn timestamp(&self, field: &str) -> Option<DateTime<Utc>> {
        self.str_field(field)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

// ============================================================================
// Content Types
// ============================================================================

/// Content type identifier used to select a record collection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentTypeId {
    HomePage,
    BlogPost,
    AboutPage,
    ServicesPage,
    ContactPage,
    /// Any other syntactically valid content type uid
    Other(String),
}

impl ContentTypeId {
    /// The content types the site knows how to render
    pub const KNOWN: [ContentTypeId; 5] = [
        ContentTypeId::HomePage,
        ContentTypeId::BlogPost,
        ContentTypeId::AboutPage,
        ContentTypeId::ServicesPage,
        ContentTypeId::ContactPage,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::HomePage => "home_page",
            Self::BlogPost => "blog_post",
            Self::AboutPage => "about_page",
            Self::ServicesPage => "services_page",
            Self::ContactPage => "contact_page",
            Self::Other(uid) => uid,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl FromStr for ContentTypeId {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "home_page" => Ok(Self::HomePage),
            "blog_post" => Ok(Self::BlogPost),
            "about_page" => Ok(Self::AboutPage),
            "services_page" => Ok(Self::ServicesPage),
            "contact_page" => Ok(Self::ContactPage),
            _ if is_valid_uid(s) => Ok(Self::Other(s.to_string())),
            _ => Err(SyncError::InvalidContentType(s.to_string())),
        }
    }
}

impl fmt::Display for ContentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ContentTypeId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ContentTypeId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

fn is_valid_uid(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

// ============================================================================
// Sync State
// ============================================================================

/// Opaque continuation cursor issued by the sync endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyncToken(String);

impl SyncToken {
    /// Wrap a raw token; blank input yields `None`
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened form for log lines
    pub fn preview(&self) -> String {
        let head: String = self.0.chars().take(20).collect();
        if head.len() < self.0.len() {
            format!("{}...", head)
        } else {
            head
        }
    }
}

impl fmt::Display for SyncToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Query sent to the sync endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncQuery {
    /// Full bootstrap, optionally narrowed to one content type or publish type
    Init {
        content_type: Option<ContentTypeId>,
        publish_type: Option<String>,
    },
    /// Delta since the given token
    Delta(SyncToken),
    /// Next page of a split response
    Pagination(String),
}

impl SyncQuery {
    /// Plain bootstrap query
    pub fn init() -> Self {
        Self::Init {
            content_type: None,
            publish_type: None,
        }
    }

    /// Delta query when a token is stored, bootstrap otherwise
    pub fn from_token(token: Option<SyncToken>) -> Self {
        match token {
            Some(token) => Self::Delta(token),
            None => Self::init(),
        }
    }

    pub fn is_init(&self) -> bool {
        matches!(self, Self::Init { .. })
    }

    /// Query-string pairs, in request order
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Init {
                content_type,
                publish_type,
            } => {
                let mut params = vec![("init", "true".to_string())];
                if let Some(ct) = content_type {
                    params.push(("content_type_uid", ct.to_string()));
                }
                if let Some(kind) = publish_type {
                    params.push(("type", kind.clone()));
                }
                params
            }
            Self::Delta(token) => vec![("sync_token", token.as_str().to_string())],
            Self::Pagination(token) => vec![("pagination_token", token.clone())],
        }
    }
}

/// Outcome of one sync call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncResult {
    /// Changed records; no ordering is assumed
    #[serde(default)]
    pub items: Vec<Record>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_token: Option<SyncToken>,
    /// Set when the endpoint split the delta into pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

impl SyncResult {
    pub fn has_changes(&self) -> bool {
        !self.items.is_empty()
    }
}
