// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Delivery API configuration
//!
//! Values are layered: built-in defaults, then the optional JSON file at
//! `<config dir>/stacksync/config.json`, then environment variables. Every
//! variable is also accepted with a `VITE_` prefix so an existing front-end
//! `.env` file can be reused as-is.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, SyncError};

pub const DEFAULT_CDN_HOST: &str = "https://cdn.contentstack.io";
pub const DEFAULT_LOCALE: &str = "en-us";
pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_CACHE_PATH: &str = "cs_cache.json";
pub const DEFAULT_TOKEN_PATH: &str = ".cs_sync_token";
pub const DEFAULT_LIMIT: u32 = 100;
/// Upper bound for the auto-sync interval (one day)
pub const MAX_AUTO_SYNC_MINUTES: u64 = 24 * 60;

/// Delivery API and sync configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    /// Stack API key
    pub api_key: String,
    /// Delivery token
    pub delivery_token: String,
    /// Publishing environment
    pub environment: String,
    pub locale: String,
    /// CDN base URL, without trailing slash
    pub cdn_host: String,
    /// Verbose logging
    pub debug: bool,
    /// Consult the fallback document when the CDN yields nothing
    pub cache_fallback: bool,
    /// Fallback document location (file path or http(s) URL)
    pub cache_path: String,
    /// File holding the persisted sync token
    pub token_path: PathBuf,
    /// Auto-sync interval; `None` picks the environment profile default
    pub auto_sync_minutes: Option<u64>,
    pub timeout_secs: u64,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            delivery_token: String::new(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            cdn_host: DEFAULT_CDN_HOST.to_string(),
            debug: false,
            cache_fallback: true,
            cache_path: DEFAULT_CACHE_PATH.to_string(),
            token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
            auto_sync_minutes: None,
            timeout_secs: 30,
        }
    }
}

impl StackConfig {
    /// Load defaults, the config file (if present) and environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(&path)?;
                let config: Self = serde_json::from_str(&content)?;
                log::debug!("Loaded config file {}", path.display());
                config
            }
            _ => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("stacksync").join("config.json"))
    }

    /// Apply overrides from a variable lookup (`CS_*`, then `VITE_CS_*`)
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .or_else(|| lookup(&format!("VITE_{}", name)))
                .filter(|v| !v.trim().is_empty())
        };

        if let Some(v) = var("CS_API_KEY") {
            self.api_key = v;
        }
        if let Some(v) = var("CS_DELIVERY_TOKEN") {
            self.delivery_token = v;
        }
        if let Some(v) = var("CS_ENV") {
            self.environment = v;
        }
        if let Some(v) = var("CS_LOCALE") {
            self.locale = v;
        }
        if let Some(v) = var("CS_CDN_HOST") {
            self.cdn_host = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = var("CS_DEBUG") {
            self.debug = parse_flag(&v).unwrap_or(self.debug);
        }
        if let Some(v) = var("CS_CACHE_FALLBACK") {
            self.cache_fallback = parse_flag(&v).unwrap_or(self.cache_fallback);
        }
        if let Some(v) = var("CS_CACHE_PATH") {
            self.cache_path = v;
        }
        if let Some(v) = var("CS_TOKEN_PATH") {
            self.token_path = PathBuf::from(v);
        }
        if let Some(v) = var("CS_AUTO_SYNC_MINUTES") {
            match v.parse() {
                Ok(minutes) => self.auto_sync_minutes = Some(minutes),
                Err(_) => log::warn!("Ignoring invalid CS_AUTO_SYNC_MINUTES: {}", v),
            }
        }
        if let Some(v) = var("CS_TIMEOUT_SECS") {
            match v.parse() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => log::warn!("Ignoring invalid CS_TIMEOUT_SECS: {}", v),
            }
        }
    }

    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty() && !self.delivery_token.is_empty()
    }

    /// Fail with `MissingCredentials` unless both key and token are set
    pub fn require_credentials(&self) -> Result<()> {
        if self.has_credentials() {
            Ok(())
        } else {
            Err(SyncError::MissingCredentials)
        }
    }

    /// Auto-sync interval in minutes.
    ///
    /// An explicit setting wins; otherwise development syncs every 2 minutes,
    /// production every 10 and anything else every 5. The result is clamped
    /// to `1..=MAX_AUTO_SYNC_MINUTES`.
    pub fn auto_sync_interval(&self) -> u64 {
        self.auto_sync_minutes
            .unwrap_or(match self.environment.as_str() {
                "development" => 2,
                "production" => 10,
                _ => 5,
            })
            .clamp(1, MAX_AUTO_SYNC_MINUTES)
    }

    /// Masked credential for display
    pub fn masked(secret: &str) -> String {
        if secret.is_empty() {
            "NOT SET".to_string()
        } else {
            let head: String = secret.chars().take(8).collect();
            format!("{}...", head)
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn with_vars(vars: &[(&str, &str)]) -> StackConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut config = StackConfig::default();
        config.apply_env(|name| map.get(name).cloned());
        config
    }

    #[test]
    fn test_defaults() {
        let config = StackConfig::default();
        assert_eq!(config.environment, "development");
        assert_eq!(config.locale, "en-us");
        assert_eq!(config.cdn_host, DEFAULT_CDN_HOST);
        assert!(config.cache_fallback);
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_env_overrides_and_vite_prefix() {
        let config = with_vars(&[
            ("VITE_CS_API_KEY", "blt123"),
            ("CS_DELIVERY_TOKEN", "cs456"),
            ("CS_ENV", "production"),
            ("CS_CDN_HOST", "https://eu-cdn.contentstack.com/"),
            ("CS_CACHE_FALLBACK", "false"),
        ]);
        assert_eq!(config.api_key, "blt123");
        assert_eq!(config.delivery_token, "cs456");
        assert_eq!(config.cdn_host, "https://eu-cdn.contentstack.com");
        assert!(!config.cache_fallback);
        assert!(config.require_credentials().is_ok());
    }

    #[test]
    fn test_unprefixed_wins_over_vite() {
        let config = with_vars(&[("CS_ENV", "staging"), ("VITE_CS_ENV", "production")]);
        assert_eq!(config.environment, "staging");
    }

    #[test]
    fn test_auto_sync_profiles() {
        assert_eq!(with_vars(&[]).auto_sync_interval(), 2);
        assert_eq!(with_vars(&[("CS_ENV", "production")]).auto_sync_interval(), 10);
        assert_eq!(with_vars(&[("CS_ENV", "staging")]).auto_sync_interval(), 5);
        assert_eq!(
            with_vars(&[("CS_AUTO_SYNC_MINUTES", "7")]).auto_sync_interval(),
            7
        );
        assert_eq!(
            with_vars(&[("CS_AUTO_SYNC_MINUTES", "0")]).auto_sync_interval(),
            1
        );
        assert_eq!(
            with_vars(&[("CS_AUTO_SYNC_MINUTES", "18446744073709551615")]).auto_sync_interval(),
            MAX_AUTO_SYNC_MINUTES
        );
    }

    #[test]
    fn test_invalid_numbers_are_ignored() {
        let config = with_vars(&[("CS_TIMEOUT_SECS", "soon")]);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_masked() {
        assert_eq!(StackConfig::masked(""), "NOT SET");
        assert_eq!(StackConfig::masked("blt0123456789"), "blt01234...");
    }
}
