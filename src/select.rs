// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Pick one entry out of a fetched list

use serde_json::Value;
use std::cmp::Ordering;

use crate::filter;
use crate::models::{ContentTypeId, Record};

/// Most recently updated record
pub fn latest(records: &[Record]) -> Option<&Record> {
    records.iter().max_by(|a, b| compare_recency(a, b))
}

/// Most recent visible record, else the most recent record overall
pub fn latest_with_content<'a>(
    content_type: &ContentTypeId,
    records: &'a [Record],
) -> Option<&'a Record> {
    records
        .iter()
        .filter(|record| filter::is_visible(content_type, record))
        .max_by(|a, b| compare_recency(a, b))
        .or_else(|| {
            let fallback = latest(records);
            if let Some(record) = fallback {
                log::warn!(
                    "No {} entry with content, using most recent {}",
                    content_type,
                    record.uid().unwrap_or("<no uid>")
                );
            }
            fallback
        })
}

/// Richest record by content score, then recency
pub fn richest(records: &[Record]) -> Option<&Record> {
    records.iter().max_by(|a, b| {
        richness(a)
            .cmp(&richness(b))
            .then_with(|| compare_recency(a, b))
    })
}

/// Content score: hero title 1, main features 10 each,
/// additional services 5 each, integrations 1 each
pub fn richness(record: &Record) -> usize {
    let count = |field: &str| match record.get(field) {
        Some(Value::Array(items)) => items.len(),
        _ => 0,
    };
    let hero = usize::from(record.str_field("hero_title").map(|s| !s.is_empty()).unwrap_or(false));
    hero + count("main_features") * 10 + count("additional_services") * 5 + count("integrations")
}

// Missing timestamps sort oldest.
fn compare_recency(a: &Record, b: &Record) -> Ordering {
    a.recency().cmp(&b.recency())
}
