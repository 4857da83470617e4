// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: Apache-2.0
//! stacksync - Library
//!
//! A client for headless-CMS delivery APIs (Contentstack-style CDN).
//!
//! ## Sources
//!
//! - **Managed client** - an embedding SDK behind [`delivery::ManagedClient`]
//! - **Delivery CDN** - direct HTTP via [`delivery::CdnClient`]
//! - **Fallback document** - static `cs_cache.json` written by `stacksync cache`
//!
//! ## Sync
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stacksync::{ContentClient, FileTokenStore, StackConfig, SyncEvent, SyncManager, SyncOrchestrator};
//!
//! let config = StackConfig::load()?;
//! let client = ContentClient::from_config(&config)?;
//! let tokens = Arc::new(FileTokenStore::new(&config.token_path));
//! let orchestrator = Arc::new(SyncOrchestrator::for_client(&client, tokens));
//! orchestrator.on_change(|event| {
//!     if let SyncEvent::DataUpdated { updated_items, .. } = event {
//!         println!("{} entries changed", updated_items);
//!     }
//! });
//! let manager = SyncManager::new(orchestrator);
//! manager.initialize(config.auto_sync_interval()).await;
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod delivery;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod models;
pub mod projection;
pub mod select;
pub mod sync;
pub mod token;

// Re-export commonly used items
pub use cli::{Cli, Commands, TokenCommands};
pub use config::StackConfig;
pub use error::{Result, SyncError};
pub use fetch::{ContentClient, FetchOptions};
pub use models::{ContentTypeId, Record, SyncQuery, SyncResult, SyncToken};
pub use projection::PageCache;
pub use sync::{AutoSync, ListenerId, ManagerStatus, SyncEvent, SyncManager, SyncOrchestrator};
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};
