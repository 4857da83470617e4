// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! CLI argument definitions using clap derive macros

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// stacksync - fetch and sync content from a headless-CMS delivery API
#[derive(Parser)]
#[command(name = "stacksync")]
#[command(version)]
#[command(about = "Fetch entries and run incremental syncs against a headless-CMS delivery API", long_about = None)]
pub struct Cli {
    /// Verbose logging (same as CS_DEBUG=true)
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    // ============================================================================
    // Read Commands
    // ============================================================================
    /// List entries of a content type (managed client, CDN, then fallback document)
    #[command(visible_alias = "ls")]
    Entries {
        /// Content type uid (home_page, blog_post, about_page, services_page, contact_page, ...)
        content_type: String,

        /// Maximum number of entries to request
        #[arg(long, short = 'n', default_value_t = 100)]
        limit: u32,

        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Fetch one entry by uid and print it as JSON
    #[command(visible_alias = "show")]
    Entry {
        /// Content type uid
        content_type: String,

        /// Entry uid
        uid: String,
    },

    /// Count published entries per content type
    Count {
        /// Content types to count (defaults to the known site types)
        content_types: Vec<String>,
    },

    // ============================================================================
    // Sync Commands
    // ============================================================================
    /// Run one incremental sync and persist the new sync token
    Sync {
        /// Discard the stored token first and request a full bootstrap
        #[arg(long)]
        reset: bool,

        /// Narrow a bootstrap to one content type (implies --reset)
        #[arg(long)]
        content_type: Option<String>,

        /// Narrow a bootstrap to one publish type, e.g. entry_published (implies --reset)
        #[arg(long)]
        publish_type: Option<String>,

        /// Write changed item uids and content types to this JSON file
        #[arg(long)]
        items_out: Option<PathBuf>,
    },

    /// Sync now, then keep syncing on a fixed interval until Ctrl+C
    Watch {
        /// Interval in minutes, 1 to 1440 (defaults to CS_AUTO_SYNC_MINUTES or the environment profile)
        #[arg(long, short = 'i', value_parser = clap::value_parser!(u64).range(1..=1440))]
        interval: Option<u64>,
    },

    /// Fetch every known content type from the CDN and write the fallback document
    Cache {
        /// Output file (defaults to CS_CACHE_PATH)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Maximum entries per content type
        #[arg(long, short = 'n', default_value_t = 100)]
        limit: u32,
    },

    /// Inspect or clear the stored sync token
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },
}

#[derive(Subcommand)]
pub enum TokenCommands {
    /// Print the stored sync token
    Show,

    /// Delete the stored sync token so the next sync bootstraps
    Clear,
}
