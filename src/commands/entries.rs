// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Entry listing and lookup commands

use anyhow::{Context, Result};
use colored::*;
use tabled::{settings::Style as TableStyle, Table, Tabled};

use crate::config::StackConfig;
use crate::delivery::CdnClient;
use crate::fetch::{ContentClient, FetchOptions};
use crate::models::{ContentTypeId, Record};

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "UID")]
    uid: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Last Updated")]
    updated: String,
}

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Content Type")]
    content_type: String,
    #[tabled(rename = "Entries")]
    count: String,
}

/// Parse a content type argument
pub fn parse_content_type(raw: &str) -> Result<ContentTypeId> {
    raw.parse::<ContentTypeId>()
        .with_context(|| format!("'{}' is not a valid content type uid", raw))
}

/// List entries of a content type
pub async fn list_entries(config: &StackConfig, content_type: &str, limit: u32, json: bool) -> Result<()> {
    let content_type = parse_content_type(content_type)?;
    let client = ContentClient::from_config(config)?;
    let entries = client
        .fetch_entries(&content_type, FetchOptions { limit })
        .await;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!(
            "No {} entries found. Check your delivery API configuration.",
            content_type
        );
        return Ok(());
    }

    let rows: Vec<EntryRow> = entries.iter().map(entry_row).collect();
    let table = Table::new(rows)
        .with(TableStyle::ascii_rounded())
        .to_string();

    println!("{}", table);
    println!("\nTotal {} entries: {}", content_type, entries.len());
    Ok(())
}

/// Print one entry as JSON
pub async fn show_entry(config: &StackConfig, content_type: &str, uid: &str) -> Result<()> {
    let content_type = parse_content_type(content_type)?;
    let client = ContentClient::from_config(config)?;
    let entry = client.fetch_entry_by_uid(&content_type, uid).await?;
    println!("{}", serde_json::to_string_pretty(&entry)?);
    Ok(())
}

/// Count published entries per content type
pub async fn count_entries(config: &StackConfig, content_types: &[String]) -> Result<()> {
    config.require_credentials()?;
    let types = if content_types.is_empty() {
        ContentTypeId::KNOWN.to_vec()
    } else {
        content_types
            .iter()
            .map(|raw| parse_content_type(raw))
            .collect::<Result<Vec<_>>>()?
    };

    let client = CdnClient::new(config)?;
    let mut rows = Vec::with_capacity(types.len());
    for content_type in &types {
        let count = match client.count_entries(content_type).await {
            Ok(count) => count.to_string(),
            Err(e) => {
                eprintln!("{} {}: {}", "[!]".red(), content_type, e);
                "error".to_string()
            }
        };
        rows.push(CountRow {
            content_type: content_type.to_string(),
            count,
        });
    }

    println!(
        "{}",
        Table::new(rows).with(TableStyle::ascii_rounded()).to_string()
    );
    Ok(())
}

fn entry_row(record: &Record) -> EntryRow {
    EntryRow {
        uid: record.uid().unwrap_or("(none)").to_string(),
        title: record
            .title()
            .or_else(|| record.str_field("hero_title"))
            .map(|t| truncate(t, 48))
            .unwrap_or_else(|| "(untitled)".to_string()),
        updated: record
            .recency()
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string()),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_row_uses_hero_title() {
        let record = Record::from_value(json!({
            "uid": "blt1",
            "hero_title": "Welcome",
            "updated_at": "2024-05-01T10:30:00Z"
        }))
        .unwrap();
        let row = entry_row(&record);
        assert_eq!(row.uid, "blt1");
        assert_eq!(row.title, "Welcome");
        assert_eq!(row.updated, "2024-05-01 10:30");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
    }

    #[test]
    fn test_parse_content_type_error_mentions_input() {
        let err = parse_content_type("Not Valid").unwrap_err();
        assert!(err.to_string().contains("Not Valid"));
    }
}
