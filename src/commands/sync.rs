// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Sync commands

use anyhow::Result;
use colored::*;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use super::entries::parse_content_type;
use crate::config::StackConfig;
use crate::fetch::ContentClient;
use crate::models::{Record, SyncQuery, SyncResult};
use crate::sync::{SyncEvent, SyncManager, SyncOrchestrator};
use crate::token::FileTokenStore;

/// Changed item summary written by `--items-out`
#[derive(Debug, Serialize, PartialEq)]
pub struct SyncItemSummary {
    pub uid: Option<String>,
    pub content_type: Option<String>,
}

impl SyncItemSummary {
    pub fn from_record(record: &Record) -> Self {
        // Sync items wrap the entry under `data`
        let uid = record
            .uid()
            .or_else(|| {
                record
                    .get("data")
                    .and_then(|data| data.get("uid"))
                    .and_then(|uid| uid.as_str())
            })
            .map(str::to_string);
        Self {
            uid,
            content_type: record.content_type_uid().map(str::to_string),
        }
    }
}

fn orchestrator(config: &StackConfig) -> Result<SyncOrchestrator> {
    config.require_credentials()?;
    let client = ContentClient::from_config(config)?;
    let tokens = Arc::new(FileTokenStore::new(&config.token_path));
    Ok(SyncOrchestrator::for_client(&client, tokens))
}

/// Run one sync and persist the token
pub async fn run_sync(
    config: &StackConfig,
    reset: bool,
    content_type: Option<&str>,
    publish_type: Option<&str>,
    items_out: Option<&Path>,
) -> Result<()> {
    let orchestrator = orchestrator(config)?;

    let narrowed = content_type.is_some() || publish_type.is_some();
    if reset || narrowed {
        orchestrator.reset_token();
    }
    let query = if narrowed {
        SyncQuery::Init {
            content_type: content_type.map(parse_content_type).transpose()?,
            publish_type: publish_type.map(str::to_string),
        }
    } else {
        orchestrator.next_query()
    };

    println!(
        "{} Starting {} (environment: {})",
        "[*]".blue(),
        if query.is_init() { "full bootstrap" } else { "delta sync" },
        config.environment.cyan()
    );

    let result = orchestrator.sync_with(query).await?;
    print_summary(&result);

    if let Some(path) = items_out {
        if result.has_changes() {
            write_items(&result, path)?;
            println!(
                "{} Saved {} with {} items",
                "[+]".green(),
                path.display(),
                result.items.len()
            );
        }
    }
    Ok(())
}

/// Initial sync plus auto-sync until Ctrl+C
pub async fn watch(config: &StackConfig, interval: Option<u64>) -> Result<()> {
    let orchestrator = Arc::new(orchestrator(config)?);
    orchestrator.on_change(|event| {
        if let SyncEvent::DataUpdated { updated_items, .. } = event {
            println!(
                "{} {} {} item(s) updated",
                "[+]".green(),
                chrono::Local::now().format("%H:%M:%S"),
                updated_items
            );
        }
    });

    let minutes = interval.unwrap_or_else(|| config.auto_sync_interval());
    let manager = SyncManager::new(orchestrator);
    if let Some(result) = manager.initialize(minutes).await {
        print_summary(&result);
    }
    println!(
        "{} Auto-sync every {} minute(s). Press Ctrl+C to stop.",
        "[*]".blue(),
        minutes
    );

    tokio::signal::ctrl_c().await?;
    manager.shutdown();
    println!("{} Stopped", "[*]".blue());
    Ok(())
}

fn print_summary(result: &SyncResult) {
    println!(
        "{} Sync completed: {} item(s)",
        "[+]".green().bold(),
        result.items.len()
    );
    match &result.sync_token {
        Some(token) => println!("   {} New sync token: {}", "[*]".blue(), token.preview()),
        None => println!("   {} No sync token in response", "[!]".yellow()),
    }
}

fn write_items(result: &SyncResult, path: &Path) -> Result<()> {
    let summary: Vec<SyncItemSummary> = result
        .items
        .iter()
        .map(SyncItemSummary::from_record)
        .collect();
    std::fs::write(path, serde_json::to_string_pretty(&summary)?)?;
    Ok(())
}
