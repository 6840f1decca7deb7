// SPDX-FileCopyrightText: 2026 GuildStore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical types are defined in `guildstore-core::types` for use
//! across the store trait boundary. This module re-exports them for
//! convenience within the storage crate.

pub use guildstore_core::types::{
    CommandToggle, GuildSettings, LeaderboardEntry, LevelingConfig, NewCommandToggle,
    UserProgress, Warning,
};
