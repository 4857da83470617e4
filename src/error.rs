// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Error types for stacksync

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Missing credentials: set CS_API_KEY and CS_DELIVERY_TOKEN")]
    MissingCredentials,

    #[error("Invalid content type: {0}")]
    InvalidContentType(String),

    #[error("Entry not found: {content_type}/{uid}")]
    EntryNotFound { content_type: String, uid: String },

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unrecognized response shape: {0}")]
    UnrecognizedShape(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SyncError {
    /// True for failures that mean "nothing there" rather than "could not ask"
    pub fn is_not_found(&self) -> bool {
        match self {
            SyncError::EntryNotFound { .. } => true,
            SyncError::Http { status, .. } => *status == 404,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
