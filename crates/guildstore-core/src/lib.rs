// SPDX-FileCopyrightText: 2026 GuildStore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the GuildStore data layer.
//!
//! Provides the error type, domain model types, and the [`GuildStore`]
//! trait implemented by storage backends.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::GuildStoreError;
pub use traits::GuildStore;
pub use types::{
    CommandToggle, GuildSettings, HealthStatus, LeaderboardEntry, LevelingConfig,
    NewCommandToggle, UserProgress, Warning,
};
