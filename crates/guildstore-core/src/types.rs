// SPDX-FileCopyrightText: 2026 GuildStore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for the per-guild data store.
//!
//! Guild, user, and moderator identifiers are `i64` throughout: snowflake
//! ids fit a signed 64-bit integer and SQLite stores them natively.

use serde::{Deserialize, Serialize};

/// Per-guild per-user progress row. At most one row exists per
/// `(guild_id, user_id)`; rows are created lazily with these defaults on
/// first read and never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    pub guild_id: i64,
    pub user_id: i64,
    /// Experience points, never negative.
    pub xp: i64,
    /// Level, starts at 1.
    pub level: i64,
    /// Economy balance.
    pub money: i64,
}

/// One leaderboard row: a user's progress within a guild, without the key
/// columns the caller already knows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: i64,
    pub xp: i64,
    pub level: i64,
}

/// An immutable moderation record. Never updated or deleted once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub id: i64,
    pub guild_id: i64,
    pub user_id: i64,
    pub moderator_id: i64,
    pub reason: Option<String>,
    /// Server-generated ISO-8601 UTC timestamp.
    pub timestamp: String,
}

/// A feature-toggle row gating whether a named bot capability is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandToggle {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub enabled: bool,
    pub required_role: String,
}

/// A new command-toggle row to be seeded, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCommandToggle {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_required_role")]
    pub required_role: String,
}

fn default_enabled() -> bool {
    true
}

fn default_required_role() -> String {
    "member".to_string()
}

/// Typed per-guild configuration. Stored as JSON in a single column but
/// never handled as a raw blob outside the store boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildSettings {
    pub guild_id: i64,
    pub leveling: LevelingConfig,
}

/// Leveling feature configuration for one guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LevelingConfig {
    /// Whether XP accrual and level-ups are active in the guild.
    pub enabled: bool,
}

impl Default for LevelingConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Health status reported by the store's health check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Store is fully operational.
    Healthy,
    /// Store is not operational.
    Unhealthy(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leveling_config_round_trips_through_json() {
        let config = LevelingConfig { enabled: false };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: LevelingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn leveling_config_defaults_to_enabled() {
        assert!(LevelingConfig::default().enabled);
    }

    #[test]
    fn leveling_config_rejects_unknown_fields() {
        let result = serde_json::from_str::<LevelingConfig>(r#"{"enabled":true,"bogus":1}"#);
        assert!(result.is_err(), "unrecognized fields must be rejected");
    }

    #[test]
    fn new_command_toggle_seed_defaults() {
        let cmd: NewCommandToggle = serde_json::from_str(r#"{"name":"ping"}"#).unwrap();
        assert_eq!(cmd.name, "ping");
        assert!(cmd.enabled);
        assert_eq!(cmd.required_role, "member");
        assert!(cmd.category.is_none());
    }
}
