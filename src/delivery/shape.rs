// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Managed-client response normalization
//!
//! The managed client answers entry queries in one of three shapes:
//!
//! ```text
//! [ { "entries": [...], "count": n } ]   query result tuple
//! { "entries": [...] }                   envelope
//! [ {...}, {...} ]                       bare list of entries
//! ```
//!
//! Single-entry fetches come back either as `{ "entry": {...} }` or as the
//! entry object itself. Anything else is rejected with
//! [`SyncError::UnrecognizedShape`] instead of being read as "no entries".

use serde_json::Value;

use crate::error::{Result, SyncError};
use crate::models::{Record, SyncResult};

/// Known shapes of an entry-list response
#[derive(Debug, Clone, PartialEq)]
pub enum EntriesResponse {
    QueryResult(Vec<Record>),
    Envelope(Vec<Record>),
    Bare(Vec<Record>),
}

impl EntriesResponse {
    pub fn into_records(self) -> Vec<Record> {
        match self {
            Self::QueryResult(records) | Self::Envelope(records) | Self::Bare(records) => records,
        }
    }
}

/// Known shapes of a single-entry response
#[derive(Debug, Clone, PartialEq)]
pub enum EntryResponse {
    Envelope(Record),
    Bare(Record),
}

impl EntryResponse {
    pub fn into_record(self) -> Record {
        match self {
            Self::Envelope(record) | Self::Bare(record) => record,
        }
    }
}

/// Classify an entry-list response
pub fn classify_entries(value: Value) -> Result<EntriesResponse> {
    match value {
        Value::Array(mut items) => {
            let is_query_result = items
                .first()
                .and_then(|first| first.get("entries"))
                .map(Value::is_array)
                .unwrap_or(false);

            if is_query_result {
                let mut first = items.swap_remove(0);
                let entries = first["entries"].take();
                Ok(EntriesResponse::QueryResult(records_from(entries, "entries")?))
            } else {
                Ok(EntriesResponse::Bare(records_from(
                    Value::Array(items),
                    "array",
                )?))
            }
        }
        Value::Object(mut map) => match map.remove("entries") {
            Some(entries @ Value::Array(_)) => {
                Ok(EntriesResponse::Envelope(records_from(entries, "entries")?))
            }
            Some(other) => Err(SyncError::UnrecognizedShape(format!(
                "`entries` is {}",
                describe(&other)
            ))),
            None => Err(SyncError::UnrecognizedShape(
                "object without `entries`".to_string(),
            )),
        },
        other => Err(SyncError::UnrecognizedShape(describe(&other))),
    }
}

/// Normalize an entry-list response into records
pub fn parse_entries(value: Value) -> Result<Vec<Record>> {
    classify_entries(value).map(EntriesResponse::into_records)
}

/// Classify a single-entry response
pub fn classify_entry(value: Value) -> Result<EntryResponse> {
    match value {
        Value::Object(mut map) => {
            if let Some(entry) = map.remove("entry") {
                return Record::from_value(entry)
                    .map(EntryResponse::Envelope)
                    .ok_or_else(|| {
                        SyncError::UnrecognizedShape("`entry` is not an object".to_string())
                    });
            }
            if map.get("uid").map(Value::is_string).unwrap_or(false) {
                Ok(EntryResponse::Bare(Record::new(map)))
            } else {
                Err(SyncError::UnrecognizedShape(
                    "object with neither `entry` nor `uid`".to_string(),
                ))
            }
        }
        other => Err(SyncError::UnrecognizedShape(describe(&other))),
    }
}

/// Normalize a single-entry response into a record
pub fn parse_entry(value: Value) -> Result<Record> {
    classify_entry(value).map(EntryResponse::into_record)
}

/// Parse a sync response (`{ items, sync_token | pagination_token }`)
pub fn parse_sync(value: Value) -> Result<SyncResult> {
    let recognized = value.as_object().map(|map| {
        map.contains_key("items")
            || map.contains_key("sync_token")
            || map.contains_key("pagination_token")
    });
    match recognized {
        Some(true) => Ok(serde_json::from_value(value)?),
        Some(false) => Err(SyncError::UnrecognizedShape(
            "sync object without `items` or a token".to_string(),
        )),
        None => Err(SyncError::UnrecognizedShape(describe(&value))),
    }
}

fn records_from(value: Value, context: &str) -> Result<Vec<Record>> {
    let Value::Array(items) = value else {
        return Err(SyncError::UnrecognizedShape(format!(
            "{} is {}",
            context,
            describe(&value)
        )));
    };
    items
        .into_iter()
        .map(|item| {
            let kind = describe(&item);
            Record::from_value(item).ok_or_else(|| {
                SyncError::UnrecognizedShape(format!("{} contains {}", context, kind))
            })
        })
        .collect()
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
    .to_string()
}
