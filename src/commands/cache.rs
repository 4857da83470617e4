// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Fallback document generation

use anyhow::Result;
use colored::*;
use std::path::{Path, PathBuf};

use crate::config::StackConfig;
use crate::delivery::{CdnClient, DeliveryApi, FallbackDocument};
use crate::models::ContentTypeId;

/// Fetch every known content type from the CDN and write the fallback document.
///
/// A content type that fails to load is written as an empty list so the
/// document always carries every key.
pub async fn write_cache(config: &StackConfig, output: Option<&Path>, limit: u32) -> Result<()> {
    config.require_credentials()?;
    let client = CdnClient::new(config)?;
    let output: PathBuf = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.cache_path));

    println!("{} Fetching content from the delivery API...", "[*]".blue());
    let document = build_document(&client, &ContentTypeId::KNOWN, limit).await;
    document.write_to(&output)?;

    println!(
        "{} Cache written to {} ({} entries)",
        "[+]".green().bold(),
        output.display(),
        document.len()
    );
    Ok(())
}

/// Collect entries for `types`, recording an empty list on failure
pub async fn build_document(
    delivery: &dyn DeliveryApi,
    types: &[ContentTypeId],
    limit: u32,
) -> FallbackDocument {
    let mut document = FallbackDocument::new();
    for content_type in types {
        let entries = match delivery.list_entries(content_type, limit).await {
            Ok(entries) => {
                println!("   {} {}: {} entries", "[+]".green(), content_type, entries.len());
                entries
            }
            Err(e) => {
                println!("   {} {}: {}", "[!]".yellow(), content_type, e);
                Vec::new()
            }
        };
        document.insert(content_type, entries);
    }
    document
}
