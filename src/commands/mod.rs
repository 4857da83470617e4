// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Command implementations

mod cache;
mod entries;
mod sync;
mod token;

pub use cache::*;
pub use entries::*;
pub use sync::*;
pub use token::*;
