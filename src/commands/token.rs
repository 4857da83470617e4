// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Sync token commands

use anyhow::Result;
use colored::*;

use crate::config::StackConfig;
use crate::token::{FileTokenStore, TokenStore};

/// Print the stored sync token
pub fn show_token(config: &StackConfig) -> Result<()> {
    let store = FileTokenStore::new(&config.token_path);
    match store.get() {
        Some(token) => {
            println!("{}", token);
            println!(
                "   {} stored in {}",
                "[*]".blue(),
                store.path().display()
            );
        }
        None => println!(
            "{} No sync token stored; the next sync will run a full bootstrap",
            "[!]".yellow()
        ),
    }
    Ok(())
}

/// Delete the stored sync token
pub fn clear_token(config: &StackConfig) -> Result<()> {
    let store = FileTokenStore::new(&config.token_path);
    store.clear();
    println!(
        "{} Sync token cleared ({})",
        "[+]".green(),
        store.path().display()
    );
    Ok(())
}
