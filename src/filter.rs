// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Content filter
//!
//! Separates authored entries from blank scaffolds left behind in the CMS.
//! A record is visible when it has a non-blank `title`, a non-empty
//! `features` list, or passes the predicate for its content type. The
//! filter only expresses a preference: callers fall back to the unfiltered
//! list when nothing survives (see [`prune_or_keep`]).

use serde_json::Value;

use crate::models::{ContentTypeId, Record};

/// Keep only visible records
pub fn prune(content_type: &ContentTypeId, records: &[Record]) -> Vec<Record> {
    records
        .iter()
        .filter(|record| is_visible(content_type, record))
        .cloned()
        .collect()
}

/// Prune, but never turn a non-empty list into an empty one
pub fn prune_or_keep(content_type: &ContentTypeId, records: Vec<Record>) -> Vec<Record> {
    let pruned = prune(content_type, &records);
    if pruned.is_empty() {
        if !records.is_empty() {
            log::debug!(
                "All {} {} entries look like scaffolds, keeping them unfiltered",
                records.len(),
                content_type
            );
        }
        records
    } else {
        pruned
    }
}

pub fn is_visible(content_type: &ContentTypeId, record: &Record) -> bool {
    has_text(record, "title") || has_items(record, "features") || type_predicate(content_type, record)
}

fn type_predicate(content_type: &ContentTypeId, record: &Record) -> bool {
    match content_type {
        ContentTypeId::HomePage => {
            any_text(record, &["hero_title", "hero_subtitle", "hero_badge"])
                || record.get("statistics").map(has_any_value).unwrap_or(false)
                || any_text(record, &["cta_primary_text", "cta_secondary_text"])
        }
        ContentTypeId::BlogPost => {
            any_text(record, &["summary", "description"])
                || record.get("body").map(body_has_content).unwrap_or(false)
        }
        ContentTypeId::AboutPage => {
            any_text(record, &["hero_title", "hero_subtitle"])
                || has_items(record, "values")
                || record.get("stats").map(non_empty_object).unwrap_or(false)
        }
        ContentTypeId::ServicesPage => {
            has_text(record, "hero_title")
                || has_items(record, "main_features")
                || has_items(record, "additional_services")
                || has_items(record, "integrations")
        }
        ContentTypeId::ContactPage => {
            has_text(record, "hero_title")
                || has_items(record, "contact_options")
                || has_text(record, "office_address")
        }
        ContentTypeId::Other(_) => true,
    }
}

fn has_text(record: &Record, field: &str) -> bool {
    record.str_field(field).map(is_non_blank).unwrap_or(false)
}

fn any_text(record: &Record, fields: &[&str]) -> bool {
    fields.iter().any(|field| has_text(record, field))
}

fn has_items(record: &Record, field: &str) -> bool {
    matches!(record.get(field), Some(Value::Array(items)) if !items.is_empty())
}

fn non_empty_object(value: &Value) -> bool {
    matches!(value, Value::Object(map) if !map.is_empty())
}

fn is_non_blank(s: &str) -> bool {
    !s.trim().is_empty()
}

/// Any scalar in the object renders to non-blank text
fn has_any_value(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.values().any(|v| match v {
            Value::String(s) => is_non_blank(s),
            Value::Number(_) => true,
            Value::Bool(b) => *b,
            _ => false,
        }),
        _ => false,
    }
}

/// Blog body: plain string, `{ html }` object, or rich-text node tree
fn body_has_content(body: &Value) -> bool {
    match body {
        Value::String(s) => is_non_blank(s),
        Value::Object(map) => match map.get("html") {
            Some(Value::String(html)) => is_non_blank(html),
            _ => has_text_leaf(body),
        },
        Value::Array(_) => has_text_leaf(body),
        _ => false,
    }
}

fn has_text_leaf(node: &Value) -> bool {
    match node {
        Value::Object(map) => {
            if let Some(Value::String(text)) = map.get("text") {
                if is_non_blank(text) {
                    return true;
                }
            }
            map.get("children").map(has_text_leaf).unwrap_or(false)
        }
        Value::Array(children) => children.iter().any(has_text_leaf),
        _ => false,
    }
}
