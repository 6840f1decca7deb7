// SPDX-FileCopyrightText: 2026 GuildStore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The asynchronous store facade over the per-guild database.

use async_trait::async_trait;

use crate::error::GuildStoreError;
use crate::types::{
    CommandToggle, GuildSettings, HealthStatus, LeaderboardEntry, NewCommandToggle, UserProgress,
    Warning,
};

/// Asynchronous facade over the embedded per-guild database.
///
/// One instance owns the single live connection for the process lifetime;
/// the hosting process constructs it at its composition root and passes it
/// by reference to whichever subsystem needs it. `initialize` must run to
/// completion before any accessor is invoked.
///
/// Identifiers are opaque to the store: no provenance validation is
/// performed here, and the calling layer is responsible for ensuring a
/// caller may only touch guilds it is authorized for.
#[async_trait]
pub trait GuildStore: Send + Sync {
    /// Opens the backing file and brings the schema up to date. Exactly once.
    async fn initialize(&self) -> Result<(), GuildStoreError>;

    /// Flushes pending writes. Safe to call when never initialized (no-op).
    async fn close(&self) -> Result<(), GuildStoreError>;

    /// Runs a trivial query to verify the connection is live.
    async fn health_check(&self) -> Result<HealthStatus, GuildStoreError>;

    // --- User progress ---

    /// Returns the progress row for `(guild_id, user_id)`, creating it with
    /// defaults (`xp=0, level=1, money=0`) if absent. Never returns "no row".
    async fn get_user_data(
        &self,
        guild_id: i64,
        user_id: i64,
    ) -> Result<UserProgress, GuildStoreError>;

    /// Overwrites `xp` and `level` for an existing row. Returns the number
    /// of rows affected: zero when the key does not exist (no row is
    /// created; call [`GuildStore::get_user_data`] first for get-or-create).
    async fn update_user_xp(
        &self,
        guild_id: i64,
        user_id: i64,
        xp: i64,
        level: i64,
    ) -> Result<usize, GuildStoreError>;

    /// Overwrites `money` for an existing row. Same no-op contract as
    /// [`GuildStore::update_user_xp`].
    async fn update_user_balance(
        &self,
        guild_id: i64,
        user_id: i64,
        money: i64,
    ) -> Result<usize, GuildStoreError>;

    /// Returns up to `limit` rows for the guild ordered by `level` then `xp`
    /// descending. Non-positive limits default to 10.
    async fn get_leaderboard(
        &self,
        guild_id: i64,
        limit: i64,
    ) -> Result<Vec<LeaderboardEntry>, GuildStoreError>;

    // --- Warnings ---

    /// Appends an immutable warning with a server-generated UTC timestamp.
    /// Returns the new warning id. Not safely retried after cancellation:
    /// a retry double-inserts unless the caller deduplicates.
    async fn add_warning(
        &self,
        guild_id: i64,
        user_id: i64,
        moderator_id: i64,
        reason: Option<&str>,
    ) -> Result<i64, GuildStoreError>;

    /// Returns all warnings for the key in insertion order.
    async fn get_warnings(
        &self,
        guild_id: i64,
        user_id: i64,
    ) -> Result<Vec<Warning>, GuildStoreError>;

    // --- Command toggles ---

    /// Returns every command-toggle row, unfiltered.
    async fn get_commands(&self) -> Result<Vec<CommandToggle>, GuildStoreError>;

    /// Inserts a command-toggle row (bootstrap seeding). Returns the new id.
    async fn insert_command(&self, command: &NewCommandToggle) -> Result<i64, GuildStoreError>;

    /// Sets `enabled` to the given value for the row with that id. Returns
    /// the number of rows affected: zero when the id does not exist (no row
    /// created, no error). The store performs no read-then-flip logic;
    /// callers wanting a flip fetch the current value and negate it.
    async fn toggle_command(
        &self,
        command_id: i64,
        enabled: bool,
    ) -> Result<usize, GuildStoreError>;

    // --- Guild settings ---

    /// Returns the typed settings for a guild, or `None` if never configured.
    async fn get_guild_settings(
        &self,
        guild_id: i64,
    ) -> Result<Option<GuildSettings>, GuildStoreError>;

    /// Creates or replaces the settings row for the guild.
    async fn set_guild_settings(&self, settings: &GuildSettings) -> Result<(), GuildStoreError>;
}
