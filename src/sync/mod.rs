// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Synchronization Module
//!
//! Incremental sync against the delivery API, change notifications, and the
//! fixed-interval auto-sync timer.

pub mod events;
pub mod manager;
pub mod orchestrator;
pub mod scheduler;

pub use events::{ListenerId, SyncEvent};
pub use manager::{ManagerStatus, SyncManager};
pub use orchestrator::SyncOrchestrator;
pub use scheduler::AutoSync;
