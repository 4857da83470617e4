//! CLI tests for the stacksync binary
//!
//! Every command runs in a scratch directory with configuration isolated
//! from the host, and none of them reach the network.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

// =============================================================================
// Test Helpers
// =============================================================================

/// Command with a clean environment rooted in `dir`
fn stacksync(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("stacksync").unwrap();
    cmd.current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("config"))
        .env("HOME", dir.path())
        .env("CS_TOKEN_PATH", dir.path().join(".cs_sync_token"));
    for var in ["CS_API_KEY", "CS_DELIVERY_TOKEN", "VITE_CS_API_KEY", "VITE_CS_DELIVERY_TOKEN"] {
        cmd.env_remove(var);
    }
    cmd
}

// =============================================================================
// Help Tests
// =============================================================================

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    stacksync(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("entries"))
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("watch"))
        .stdout(predicate::str::contains("token"));
}

#[test]
fn test_sync_help_shows_flags() {
    let dir = TempDir::new().unwrap();
    stacksync(&dir)
        .args(["sync", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--reset"))
        .stdout(predicate::str::contains("--items-out"));
}

// =============================================================================
// Token Tests
// =============================================================================

#[test]
fn test_token_show_without_token() {
    let dir = TempDir::new().unwrap();
    stacksync(&dir)
        .args(["token", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No sync token stored"));
}

#[test]
fn test_token_show_prints_stored_token() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".cs_sync_token"), "blt_token_abc\n").unwrap();
    stacksync(&dir)
        .args(["token", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("blt_token_abc"));
}

#[test]
fn test_token_clear_removes_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".cs_sync_token");
    fs::write(&path, "blt_token_abc").unwrap();

    stacksync(&dir)
        .args(["token", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cleared"));

    assert!(!path.exists());
}

// =============================================================================
// Failure Tests
// =============================================================================

#[test]
fn test_invalid_content_type_fails() {
    let dir = TempDir::new().unwrap();
    stacksync(&dir)
        .args(["entries", "Not A Type"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not A Type"));
}

#[test]
fn test_sync_requires_credentials() {
    let dir = TempDir::new().unwrap();
    stacksync(&dir)
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing credentials"));
}

#[test]
fn test_cache_requires_credentials() {
    let dir = TempDir::new().unwrap();
    stacksync(&dir)
        .arg("cache")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing credentials"));

    assert!(!dir.path().join("cs_cache.json").exists());
}

#[test]
fn test_watch_rejects_out_of_range_interval() {
    let dir = TempDir::new().unwrap();
    for interval in ["0", "1441", "18446744073709551615"] {
        stacksync(&dir)
            .args(["watch", "--interval", interval])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--interval"));
    }
}
