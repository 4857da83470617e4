// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: Apache-2.0
//! stacksync - Main entry point
//!
//! A CLI tool to fetch entries and run incremental syncs against a
//! headless-CMS delivery API.

use anyhow::Result;
use clap::Parser;
use stacksync::cli::{Cli, Commands, TokenCommands};
use stacksync::{commands, StackConfig};

fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = StackConfig::load()?;
    if cli.debug {
        config.debug = true;
    }
    init_logging(config.debug);
    log::debug!(
        "Using environment {} with API key {}",
        config.environment,
        StackConfig::masked(&config.api_key)
    );

    match cli.command {
        // Token commands never touch the network
        Commands::Token { command } => match command {
            TokenCommands::Show => commands::show_token(&config),
            TokenCommands::Clear => commands::clear_token(&config),
        },
        command => {
            let rt = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            rt.block_on(run(command, &config))
        }
    }
}

async fn run(command: Commands, config: &StackConfig) -> Result<()> {
    match command {
        // ====================================================================
        // Read Commands
        // ====================================================================
        Commands::Entries {
            content_type,
            limit,
            json,
        } => commands::list_entries(config, &content_type, limit, json).await,
        Commands::Entry { content_type, uid } => {
            commands::show_entry(config, &content_type, &uid).await
        }
        Commands::Count { content_types } => commands::count_entries(config, &content_types).await,

        // ====================================================================
        // Sync Commands
        // ====================================================================
        Commands::Sync {
            reset,
            content_type,
            publish_type,
            items_out,
        } => {
            commands::run_sync(
                config,
                reset,
                content_type.as_deref(),
                publish_type.as_deref(),
                items_out.as_deref(),
            )
            .await
        }
        Commands::Watch { interval } => commands::watch(config, interval).await,
        Commands::Cache { output, limit } => {
            commands::write_cache(config, output.as_deref(), limit).await
        }
        Commands::Token { command } => match command {
            TokenCommands::Show => commands::show_token(config),
            TokenCommands::Clear => commands::clear_token(config),
        },
    }
}
