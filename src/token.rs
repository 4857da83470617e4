// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Sync token persistence
//!
//! Every operation is best-effort: storage failures are logged and read back
//! as "no token", which makes the next sync a full bootstrap.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::models::SyncToken;

/// A single persistent slot holding the sync token
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<SyncToken>;

    /// Store a token; `None` deletes the slot
    fn set(&self, token: Option<SyncToken>);

    fn clear(&self) {
        self.set(None);
    }
}

/// Token kept in one plain-text file (`.cs_sync_token` by default)
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<SyncToken> {
        match std::fs::read_to_string(&self.path) {
            // Only the line ending is stripped; the token itself is opaque
            Ok(content) => SyncToken::new(content.trim_end_matches(['\r', '\n'])),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("Failed to read sync token {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn set(&self, token: Option<SyncToken>) {
        let result = match token.filter(|t| !t.as_str().trim().is_empty()) {
            Some(token) => {
                if let Some(parent) = self.path.parent() {
                    if !parent.as_os_str().is_empty() {
                        if let Err(e) = std::fs::create_dir_all(parent) {
                            log::warn!("Failed to create {}: {}", parent.display(), e);
                        }
                    }
                }
                std::fs::write(&self.path, token.as_str())
            }
            None => match std::fs::remove_file(&self.path) {
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                other => other,
            },
        };
        if let Err(e) = result {
            log::warn!("Failed to update sync token {}: {}", self.path.display(), e);
        }
    }
}

/// Process-local token slot
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<SyncToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: SyncToken) -> Self {
        Self {
            slot: Mutex::new(Some(token)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<SyncToken> {
        match self.slot.lock() {
            Ok(slot) => slot.clone(),
            Err(_) => None,
        }
    }

    fn set(&self, token: Option<SyncToken>) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = token.filter(|t| !t.as_str().trim().is_empty());
        }
    }
}
