//! Tests for sync token persistence
//!
//! File-backed storage is best-effort: failures read back as "no token".

mod common;

use common::{sync_payload, FakeDelivery};
use stacksync::models::{SyncQuery, SyncToken};
use stacksync::sync::SyncOrchestrator;
use stacksync::token::{FileTokenStore, TokenStore};
use std::sync::Arc;
use tempfile::TempDir;

// ============================================================================
// FileTokenStore Tests
// ============================================================================

mod file_store_tests {
    use super::*;

    #[test]
    fn test_token_survives_new_store_instance() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".cs_sync_token");

        FileTokenStore::new(&path).set(SyncToken::new("blt_persisted"));

        let reopened = FileTokenStore::new(&path);
        assert_eq!(reopened.get(), SyncToken::new("blt_persisted"));
    }

    #[test]
    fn test_token_file_is_plain_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".cs_sync_token");

        FileTokenStore::new(&path).set(SyncToken::new("abc123"));

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "abc123");
    }

    #[test]
    fn test_unreadable_slot_reads_as_none() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be
        let store = FileTokenStore::new(dir.path());

        assert!(store.get().is_none());
        store.set(SyncToken::new("ignored"));
        assert!(store.get().is_none());
    }

    #[test]
    fn test_clear_missing_file_is_silent() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().join("never-written"));
        store.clear();
        assert!(store.get().is_none());
    }
}

// ============================================================================
// Orchestrator Persistence Tests
// ============================================================================

mod orchestrator_persistence_tests {
    use super::*;

    #[tokio::test]
    async fn test_next_run_resumes_from_file_token() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".cs_sync_token");

        let delivery = Arc::new(FakeDelivery::new());
        delivery.push_sync(Ok(sync_payload(Vec::new(), "tok-from-first-run")));
        SyncOrchestrator::new(delivery, Arc::new(FileTokenStore::new(&path)))
            .sync()
            .await
            .unwrap();

        let delivery = Arc::new(FakeDelivery::new());
        let second = SyncOrchestrator::new(delivery.clone(), Arc::new(FileTokenStore::new(&path)));
        second.sync().await.unwrap();

        assert_eq!(
            delivery.last_sync_query(),
            Some(SyncQuery::Delta(SyncToken::new("tok-from-first-run").unwrap()))
        );
    }
}
