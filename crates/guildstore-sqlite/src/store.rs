// SPDX-FileCopyrightText: 2026 GuildStore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the GuildStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use guildstore_config::StorageConfig;
use guildstore_core::types::{
    CommandToggle, GuildSettings, HealthStatus, LeaderboardEntry, NewCommandToggle, UserProgress,
    Warning,
};
use guildstore_core::{GuildStore, GuildStoreError};

use crate::database::Database;
use crate::queries;

/// SQLite-backed guild data store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is opened and migrated on the first
/// call to [`GuildStore::initialize`]; the instance is constructed at the
/// hosting process's composition root and shared by reference.
pub struct SqliteGuildStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteGuildStore {
    /// Create a new store with the given configuration.
    ///
    /// The database connection is not opened until [`GuildStore::initialize`]
    /// is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, GuildStoreError> {
        self.db.get().ok_or_else(|| {
            GuildStoreError::Internal("store not initialized -- call initialize() first".into())
        })
    }
}

#[async_trait]
impl GuildStore for SqliteGuildStore {
    async fn initialize(&self) -> Result<(), GuildStoreError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        db.migrate().await?;
        self.db
            .set(db)
            .map_err(|_| GuildStoreError::Internal("store already initialized".into()))?;
        debug!(path = %self.config.database_path, "SQLite guild store initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), GuildStoreError> {
        // A store that was never initialized has nothing to flush.
        if let Some(db) = self.db.get() {
            db.connection()
                .call(|conn| -> rusqlite::Result<()> {
                    conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                    Ok(())
                })
                .await
                .map_err(crate::database::map_tr_err)?;
            debug!("WAL checkpoint complete");
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<HealthStatus, GuildStoreError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> rusqlite::Result<()> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    // --- User progress ---

    async fn get_user_data(
        &self,
        guild_id: i64,
        user_id: i64,
    ) -> Result<UserProgress, GuildStoreError> {
        queries::progress::get_user_data(self.db()?, guild_id, user_id).await
    }

    async fn update_user_xp(
        &self,
        guild_id: i64,
        user_id: i64,
        xp: i64,
        level: i64,
    ) -> Result<usize, GuildStoreError> {
        queries::progress::update_user_xp(self.db()?, guild_id, user_id, xp, level).await
    }

    async fn update_user_balance(
        &self,
        guild_id: i64,
        user_id: i64,
        money: i64,
    ) -> Result<usize, GuildStoreError> {
        queries::progress::update_user_balance(self.db()?, guild_id, user_id, money).await
    }

    async fn get_leaderboard(
        &self,
        guild_id: i64,
        limit: i64,
    ) -> Result<Vec<LeaderboardEntry>, GuildStoreError> {
        queries::progress::get_leaderboard(self.db()?, guild_id, limit).await
    }

    // --- Warnings ---

    async fn add_warning(
        &self,
        guild_id: i64,
        user_id: i64,
        moderator_id: i64,
        reason: Option<&str>,
    ) -> Result<i64, GuildStoreError> {
        queries::warnings::add_warning(self.db()?, guild_id, user_id, moderator_id, reason).await
    }

    async fn get_warnings(
        &self,
        guild_id: i64,
        user_id: i64,
    ) -> Result<Vec<Warning>, GuildStoreError> {
        queries::warnings::get_warnings(self.db()?, guild_id, user_id).await
    }

    // --- Command toggles ---

    async fn get_commands(&self) -> Result<Vec<CommandToggle>, GuildStoreError> {
        queries::commands::get_commands(self.db()?).await
    }

    async fn insert_command(&self, command: &NewCommandToggle) -> Result<i64, GuildStoreError> {
        queries::commands::insert_command(self.db()?, command).await
    }

    async fn toggle_command(
        &self,
        command_id: i64,
        enabled: bool,
    ) -> Result<usize, GuildStoreError> {
        queries::commands::toggle_command(self.db()?, command_id, enabled).await
    }

    // --- Guild settings ---

    async fn get_guild_settings(
        &self,
        guild_id: i64,
    ) -> Result<Option<GuildSettings>, GuildStoreError> {
        queries::settings::get_guild_settings(self.db()?, guild_id).await
    }

    async fn set_guild_settings(&self, settings: &GuildSettings) -> Result<(), GuildStoreError> {
        queries::settings::set_guild_settings(self.db()?, settings).await
    }
}
