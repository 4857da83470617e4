// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Change notifications emitted by the sync orchestrator

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::models::{SyncResult, SyncToken};

/// Notification sent to registered listeners
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// Every successful sync, with the full payload
    Synced(SyncResult),
    /// The sync returned changed items; cached projections are stale
    DataUpdated {
        updated_items: usize,
        sync_token: Option<SyncToken>,
    },
}

/// Handle returned by `on_change`, used to unregister
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Handler = Arc<dyn Fn(&SyncEvent) + Send + Sync>;

/// Registry of event handlers
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: AtomicU64,
    handlers: RwLock<Vec<(ListenerId, Handler)>>,
}

impl Listeners {
    pub(crate) fn add(&self, handler: Handler) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        match self.handlers.write() {
            Ok(mut handlers) => handlers.push((id, handler)),
            Err(poisoned) => poisoned.into_inner().push((id, handler)),
        }
        id
    }

    pub(crate) fn remove(&self, id: ListenerId) -> bool {
        let mut handlers = match self.handlers.write() {
            Ok(handlers) => handlers,
            Err(poisoned) => poisoned.into_inner(),
        };
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        handlers.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        match self.handlers.read() {
            Ok(handlers) => handlers.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    /// Call every handler; the lock is released first so handlers may
    /// register or remove listeners themselves
    pub(crate) fn emit(&self, event: &SyncEvent) {
        let snapshot: Vec<Handler> = match self.handlers.read() {
            Ok(handlers) => handlers.iter().map(|(_, h)| Arc::clone(h)).collect(),
            Err(poisoned) => poisoned
                .into_inner()
                .iter()
                .map(|(_, h)| Arc::clone(h))
                .collect(),
        };
        for handler in snapshot {
            handler(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_add_emit_remove() {
        let listeners = Listeners::default();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        let id = listeners.add(Arc::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(listeners.len(), 1);

        listeners.emit(&SyncEvent::Synced(SyncResult::default()));
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        assert!(listeners.remove(id));
        assert!(!listeners.remove(id));
        listeners.emit(&SyncEvent::Synced(SyncResult::default()));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_ids_are_unique() {
        let listeners = Listeners::default();
        let a = listeners.add(Arc::new(|_| {}));
        let b = listeners.add(Arc::new(|_| {}));
        assert_ne!(a, b);
    }
}
